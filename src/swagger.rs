use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::{CreateOrderRequest, ExportQuery, Order, OrderListResponse, Pagination, UpdateOrderRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orders Management API",
        description = "A REST API for managing orders with pagination and filtering support"
    ),
    paths(
        handlers::order::get_orders,
        handlers::order::export_orders,
        handlers::order::create_order,
        handlers::order::update_order,
        handlers::order::delete_order,
        handlers::health::health,
    ),
    components(schemas(
        Order,
        Pagination,
        OrderListResponse,
        CreateOrderRequest,
        UpdateOrderRequest,
        ExportQuery,
    )),
    tags(
        (name = "order", description = "Order management endpoints"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
