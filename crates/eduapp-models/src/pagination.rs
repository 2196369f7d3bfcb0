//! Paged-result envelope returned by listing endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of results plus the metadata needed to page through the rest.
///
/// Totals are computed against the filtered result set, not the whole table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    /// Wrap a page of data. `current_page` is zero-based.
    pub fn new(data: Vec<T>, current_page: i64, page_size: i64, total_elements: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_elements + page_size - 1) / page_size
        } else {
            0
        };
        Self {
            data,
            current_page,
            page_size,
            total_elements,
            total_pages,
        }
    }
}
