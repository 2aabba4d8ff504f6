use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Statuses accepted on create/update. Seeded data may additionally carry
/// "cancelled", which is filterable on read but rejected on writes.
pub const VALID_STATUSES: [&str; 3] = ["pending", "shipped", "delivered"];

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub item_name: String,
    pub amount: f64,
    pub status: String,
    /// RFC 3339 UTC timestamp, stamped at insert and never updated.
    pub date_created: String,
}

/// Raw list-endpoint query parameters. Everything arrives as text so that
/// malformed values fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Create body. `amount` stays a raw JSON value so a non-numeric amount is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub item_name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<serde_json::Value>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    /// An explicit `"amount": null` counts as supplied (and fails amount
    /// validation); only an absent field means "leave unchanged".
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<serde_json::Value>,
    pub status: Option<String>,
}

/// Keeps JSON null distinct from an absent field: null deserializes to
/// `Some(Value::Null)` instead of `None`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportQuery {
    pub format: Option<String>,
}
