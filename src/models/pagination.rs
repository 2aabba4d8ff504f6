use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// Metadata returned alongside list results.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_records: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_records: i64) -> Self {
        let total_pages = (total_records + limit - 1) / limit;
        Self {
            page,
            limit,
            total_records,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub success: bool,
    pub data: Vec<Order>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_total_pages_up() {
        let p = Pagination::new(1, 10, 50);
        assert_eq!(p.total_pages, 5);

        let p = Pagination::new(1, 10, 51);
        assert_eq!(p.total_pages, 6);
    }

    #[test]
    fn empty_result_set() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn next_and_prev_flags() {
        let p = Pagination::new(2, 10, 50);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);

        let p = Pagination::new(5, 10, 50);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);

        // page past the end is not an error, just empty
        let p = Pagination::new(999, 10, 50);
        assert!(!p.has_next_page);
    }

    #[test]
    fn camel_case_envelope_keys() {
        let p = Pagination::new(1, 10, 50);
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("totalRecords").is_some());
        assert!(v.get("totalPages").is_some());
        assert!(v.get("hasNextPage").is_some());
        assert!(v.get("hasPrevPage").is_some());
    }
}
