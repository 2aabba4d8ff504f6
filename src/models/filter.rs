//! Translates raw, untrusted query parameters into a safe filter, sort and
//! pagination specification. Filter values are carried as bound parameters;
//! sort column and direction come from closed allow-lists, since they cannot
//! be bound as values.

use crate::models::OrderQuery;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard ceiling on page size, enforced regardless of input.
pub const MAX_LIMIT: i64 = 100;

/// One WHERE predicate: a static SQL fragment plus the value bound into its
/// placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    StatusEq(String),
    AmountGte(f64),
    AmountLte(f64),
    CreatedOnOrAfter(String),
    CreatedOnOrBefore(String),
}

impl Predicate {
    pub fn sql(&self) -> &'static str {
        match self {
            Predicate::StatusEq(_) => "status = ?",
            Predicate::AmountGte(_) => "amount >= ?",
            Predicate::AmountLte(_) => "amount <= ?",
            // date() drops the time-of-day so the bounds are inclusive on
            // the date component
            Predicate::CreatedOnOrAfter(_) => "date(date_created) >= date(?)",
            Predicate::CreatedOnOrBefore(_) => "date(date_created) <= date(?)",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderFilter {
    pub predicates: Vec<Predicate>,
}

impl OrderFilter {
    pub fn from_query(query: &OrderQuery) -> Self {
        let mut predicates = Vec::new();

        // Passthrough by design: an unknown status simply matches no rows.
        if let Some(status) = non_empty(&query.status) {
            predicates.push(Predicate::StatusEq(status.to_string()));
        }

        if let Some(min) = parse_f64(&query.min_amount) {
            predicates.push(Predicate::AmountGte(min));
        }

        if let Some(max) = parse_f64(&query.max_amount) {
            predicates.push(Predicate::AmountLte(max));
        }

        if let Some(start) = non_empty(&query.start_date) {
            predicates.push(Predicate::CreatedOnOrAfter(start.to_string()));
        }

        if let Some(end) = non_empty(&query.end_date) {
            predicates.push(Predicate::CreatedOnOrBefore(end.to_string()));
        }

        Self { predicates }
    }

    /// Joined WHERE clause, or an empty string when unfiltered. Fragments
    /// are the static ones from [`Predicate::sql`]; values are bound by the
    /// store.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            let conditions: Vec<&str> = self.predicates.iter().map(Predicate::sql).collect();
            format!("WHERE {}", conditions.join(" AND "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    #[default]
    DateCreated,
    Amount,
    Status,
    ItemName,
}

impl SortField {
    /// Allow-list lookup; anything unrecognized falls back to
    /// `date_created`. This is the sole defense against injecting SQL via
    /// the sort field.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("id") => SortField::Id,
            Some("date_created") => SortField::DateCreated,
            Some("amount") => SortField::Amount,
            Some("status") => SortField::Status,
            Some("item_name") => SortField::ItemName,
            _ => SortField::default(),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::DateCreated => "date_created",
            SortField::Amount => "amount",
            SortField::Status => "status",
            SortField::ItemName => "item_name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Exactly "desc" (case-sensitive) descends; everything else ascends.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Fully validated list-query specification, applied identically to the
/// count and data queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
    pub filter: OrderFilter,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
}

impl ListParams {
    pub fn from_query(query: &OrderQuery) -> Self {
        let page = parse_i64(&query.page).unwrap_or(DEFAULT_PAGE).max(1);
        let limit = parse_i64(&query.limit)
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        Self {
            page,
            limit,
            offset: (page - 1) * limit,
            filter: OrderFilter::from_query(query),
            sort_field: SortField::parse(query.sort_by.as_deref()),
            sort_dir: SortDir::parse(query.order.as_deref()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_i64(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.parse::<i64>().ok())
}

fn parse_f64(value: &Option<String>) -> Option<f64> {
    // NaN never compares true, so a NaN bound would silently match zero
    // rows instead of being omitted like any other unparseable value
    value
        .as_deref()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}
