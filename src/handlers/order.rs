use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::middlewares::RateLimiter;
use crate::models::*;
use crate::services::OrderService;

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(
        ("page" = Option<u32>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<u32>, Query, description = "Page size, defaults to 10, capped at 100"),
        ("status" = Option<String>, Query, description = "Exact-match status filter"),
        ("min_amount" = Option<f64>, Query, description = "Minimum amount (inclusive)"),
        ("max_amount" = Option<f64>, Query, description = "Maximum amount (inclusive)"),
        ("start_date" = Option<String>, Query, description = "Created on or after (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Created on or before (YYYY-MM-DD)"),
        ("sort_by" = Option<String>, Query, description = "id, date_created, amount, status or item_name"),
        ("order" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "Paginated orders", body = OrderListResponse),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse, AppError> {
    let params = ListParams::from_query(&query);

    let total_records = order_service.count(&params.filter).await?;
    let orders = order_service.list(&params).await?;

    Ok(HttpResponse::Ok().json(OrderListResponse {
        success: true,
        data: orders,
        pagination: Pagination::new(params.page, params.limit, total_records),
    }))
}

#[utoipa::path(
    get,
    path = "/orders/export",
    tag = "order",
    params(
        ("format" = String, Query, description = "Export format, json or csv")
    ),
    responses(
        (status = 200, description = "All orders as a download"),
        (status = 400, description = "Invalid or missing format"),
        (status = 500, description = "Database error")
    )
)]
pub async fn export_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    let format = match query.format.as_deref() {
        Some("json") => "json",
        Some("csv") => "csv",
        _ => return Err(AppError::InvalidExportFormat),
    };

    let orders = order_service.export_all().await?;

    let response = if format == "json" {
        let body = serde_json::to_string_pretty(&orders)?;
        HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(("Content-Disposition", "attachment; filename=orders.json"))
            .body(body)
    } else {
        HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(("Content-Disposition", "attachment; filename=orders.csv"))
            .body(orders_to_csv(&orders))
    };

    Ok(response)
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Missing fields, invalid amount or invalid status"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let item_name = body.item_name.as_deref().filter(|s| !s.is_empty());
    let status = body.status.as_deref().filter(|s| !s.is_empty());

    // Checked in priority order: missing fields, then amount, then status.
    let (item_name, amount, status) = match (item_name, &body.amount, status) {
        (Some(item_name), Some(amount), Some(status)) => (item_name, amount, status),
        _ => return Err(AppError::MissingFields),
    };

    let amount = validate_amount(amount)?;
    let status = validate_status(status)?;

    let order = order_service.insert(item_name, amount, status).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Order created successfully",
        "data": order,
    })))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, description = "No update fields, invalid amount or invalid status"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = body.status.as_deref().filter(|s| !s.is_empty());

    if body.amount.is_none() && status.is_none() {
        return Err(AppError::MissingUpdateFields);
    }

    let amount = body.amount.as_ref().map(validate_amount).transpose()?;
    let status = status.map(validate_status).transpose()?;

    let order = order_service.update(id, amount, status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order updated successfully",
        "data": order,
    })))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    order_service.delete_by_id(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Header `id,item_name,amount,status,date_created`, one row per order in
/// the order given (id ascending from the store).
fn orders_to_csv(orders: &[Order]) -> String {
    let mut csv = String::from("id,item_name,amount,status,date_created\n");
    for order in orders {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            order.id,
            csv_field(&order.item_name),
            order.amount,
            csv_field(&order.status),
            csv_field(&order.date_created),
        ));
    }
    csv
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn validate_amount(amount: &serde_json::Value) -> Result<f64, AppError> {
    match amount.as_f64() {
        Some(amount) if amount > 0.0 => Ok(amount),
        _ => Err(AppError::InvalidAmount),
    }
}

fn validate_status(status: &str) -> Result<&str, AppError> {
    if VALID_STATUSES.contains(&status) {
        Ok(status)
    } else {
        Err(AppError::InvalidStatus)
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .wrap(RateLimiter::default())
            // registered ahead of /{id} so "export" is not read as an id
            .route("/export", web::get().to(export_orders))
            .route("", web::get().to(get_orders))
            .route("", web::post().to(create_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order)),
    );
}
