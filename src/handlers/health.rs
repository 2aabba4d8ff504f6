use actix_web::{web, HttpResponse};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up")
    )
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "message": "Server is running",
    }))
}

/// Catch-all for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Route not found" }))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
