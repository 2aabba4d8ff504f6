use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::VALID_STATUSES;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Missing update fields")]
    MissingUpdateFields,

    #[error("Invalid export format")]
    InvalidExportFormat,

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::MissingFields => {
                log::warn!("Validation error: missing required fields");
                HttpResponse::BadRequest().json(json!({
                    "error": "Missing required fields",
                    "required": ["item_name", "amount", "status"],
                }))
            }
            AppError::InvalidAmount => {
                log::warn!("Validation error: invalid amount");
                HttpResponse::BadRequest().json(json!({
                    "error": "Invalid amount",
                    "message": "Amount must be a number greater than 0",
                }))
            }
            AppError::InvalidStatus => {
                log::warn!("Validation error: invalid status");
                HttpResponse::BadRequest().json(json!({
                    "error": "Invalid status",
                    "message": format!("Status must be one of: {}", VALID_STATUSES.join(", ")),
                }))
            }
            AppError::MissingUpdateFields => {
                log::warn!("Validation error: no update fields supplied");
                HttpResponse::BadRequest().json(json!({
                    "error": "Missing update fields",
                    "message": "At least one of amount or status must be provided",
                }))
            }
            AppError::InvalidExportFormat => {
                log::warn!("Validation error: invalid export format");
                HttpResponse::BadRequest().json(json!({
                    "error": "Invalid format",
                    "message": "Format must be either \"json\" or \"csv\"",
                }))
            }
            AppError::OrderNotFound(id) => HttpResponse::NotFound().json(json!({
                "error": "Order not found",
                "message": format!("No order found with ID {id}"),
            })),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Database error",
                    "details": err.to_string(),
                }))
            }
            AppError::SerdeJsonError(err) => {
                log::error!("Serialization error: {err}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Serialization error",
                    "details": err.to_string(),
                }))
            }
        }
    }
}
