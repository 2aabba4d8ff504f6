use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::{ListParams, Order, OrderFilter, Predicate};

const ORDER_COLUMNS: &str = "id, item_name, amount, status, date_created";

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of rows matching the filter, pagination not applied.
    pub async fn count(&self, filter: &OrderFilter) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM orders {}", filter.where_clause());
        let mut query = sqlx::query_scalar::<Sqlite, i64>(&sql);
        for predicate in &filter.predicates {
            query = match predicate {
                Predicate::StatusEq(s) => query.bind(s.as_str()),
                Predicate::AmountGte(v) | Predicate::AmountLte(v) => query.bind(*v),
                Predicate::CreatedOnOrAfter(d) | Predicate::CreatedOnOrBefore(d) => {
                    query.bind(d.as_str())
                }
            };
        }

        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Filtered, sorted, paginated page of orders. Sort column and
    /// direction come from the allow-list enums; filter values, limit and
    /// offset are bound parameters.
    pub async fn list(&self, params: &ListParams) -> AppResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders {} ORDER BY {} {} LIMIT ? OFFSET ?",
            params.filter.where_clause(),
            params.sort_field.column(),
            params.sort_dir.sql(),
        );

        let mut query = sqlx::query_as::<Sqlite, Order>(&sql);
        for predicate in &params.filter.predicates {
            query = bind_predicate(query, predicate);
        }
        query = query.bind(params.limit).bind(params.offset);

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn insert(&self, item_name: &str, amount: f64, status: &str) -> AppResult<Order> {
        let date_created = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let result = sqlx::query(
            "INSERT INTO orders (item_name, amount, status, date_created) VALUES (?, ?, ?, ?)",
        )
        .bind(item_name)
        .bind(amount)
        .bind(status)
        .bind(&date_created)
        .execute(&self.pool)
        .await?;

        Ok(Order {
            id: result.last_insert_rowid(),
            item_name: item_name.to_string(),
            amount,
            status: status.to_string(),
            date_created,
        })
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        let order =
            sqlx::query_as::<Sqlite, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Partial update of amount and/or status. Read-then-write with no
    /// isolation against a concurrent writer; last write wins.
    pub async fn update(
        &self,
        id: i64,
        amount: Option<f64>,
        status: Option<&str>,
    ) -> AppResult<Order> {
        if amount.is_none() && status.is_none() {
            return Err(AppError::MissingUpdateFields);
        }

        self.get_by_id(id)
            .await?
            .ok_or(AppError::OrderNotFound(id))?;

        let mut updates: Vec<&str> = Vec::new();
        if amount.is_some() {
            updates.push("amount = ?");
        }
        if status.is_some() {
            updates.push("status = ?");
        }

        let sql = format!("UPDATE orders SET {} WHERE id = ?", updates.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(amount) = amount {
            query = query.bind(amount);
        }
        if let Some(status) = status {
            query = query.bind(status);
        }
        query.bind(id).execute(&self.pool).await?;

        self.get_by_id(id)
            .await?
            .ok_or(AppError::OrderNotFound(id))
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::OrderNotFound(id));
        }

        Ok(())
    }

    /// Every order, unfiltered and unpaginated, by id ascending.
    pub async fn export_all(&self) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<Sqlite, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

fn bind_predicate<'q>(
    query: sqlx::query::QueryAs<'q, Sqlite, Order, SqliteArguments<'q>>,
    predicate: &'q Predicate,
) -> sqlx::query::QueryAs<'q, Sqlite, Order, SqliteArguments<'q>> {
    match predicate {
        Predicate::StatusEq(s) => query.bind(s.as_str()),
        Predicate::AmountGte(v) | Predicate::AmountLte(v) => query.bind(*v),
        Predicate::CreatedOnOrAfter(d) | Predicate::CreatedOnOrBefore(d) => query.bind(d.as_str()),
    }
}
