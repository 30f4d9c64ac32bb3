//! Pagination and sort parameters for repository list queries.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::sorting::SortDirection;

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Pagination and sort parameters for a filtered list query.
///
/// Pure arithmetic, no I/O. Repositories use [`Filter::order_by`] to
/// resolve the sort column against their own allow-list before the
/// column name is interpolated into query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    /// Requested sort column. `None` falls back to the repository default.
    #[serde(default)]
    pub sort_field: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Filter {
    /// Create a new filter, clamping page and page size into valid ranges.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            sort_field: None,
            direction: SortDirection::default(),
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Set the sort column.
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.direction = direction;
        self
    }

    /// Resolve the sort column against an allow-list.
    ///
    /// Returns the requested column only if it appears in `allowed`, or
    /// `default` when no column was requested. An unknown column is a
    /// validation error, never interpolated into SQL.
    pub fn order_by<'a>(&'a self, allowed: &[&'a str], default: &'a str) -> AppResult<&'a str> {
        match self.sort_field.as_deref() {
            None => Ok(default),
            Some(field) => allowed
                .iter()
                .copied()
                .find(|col| *col == field)
                .ok_or_else(|| AppError::validation(format!("Cannot sort by '{field}'"))),
        }
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// Combine a page of items with the unfiltered total row count.
    pub fn paginate<T: Serialize>(&self, items: Vec<T>, total_rows: u64) -> FilteredResult<T> {
        FilteredResult::new(items, self.page, self.page_size, total_rows)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            sort_field: None,
            direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page of entities plus computed pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredResult<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of rows across all pages.
    pub total_rows: u64,
    /// Total number of pages. Zero rows means zero pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T: Serialize> FilteredResult<T> {
    /// Create a new filtered result.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_rows: u64) -> Self {
        let total_pages = total_rows.div_ceil(page_size.max(1));
        Self {
            items,
            page,
            page_size,
            total_rows,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1 && total_pages > 0,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let filter = Filter::new(1, 10);
        assert_eq!(filter.offset(), 0);
        assert_eq!(filter.limit(), 10);

        let filter = Filter::new(3, 25);
        assert_eq!(filter.offset(), 50);
        assert_eq!(filter.limit(), 25);
    }

    #[test]
    fn test_page_and_size_are_clamped() {
        let filter = Filter::new(0, 0);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 1);

        let filter = Filter::new(2, 10_000);
        assert_eq!(filter.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        let filter = Filter::new(1, 2);
        let result = filter.paginate(vec!["a", "b"], 3);
        assert_eq!(result.total_rows, 3);
        assert_eq!(result.total_pages, 2);
        assert!(result.has_next);
        assert!(!result.has_previous);

        let result = filter.paginate(vec!["a", "b"], 4);
        assert_eq!(result.total_pages, 2);

        let result = filter.paginate(vec!["a", "b"], 5);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn test_zero_rows_means_zero_pages() {
        let filter = Filter::new(1, 10);
        let result = filter.paginate(Vec::<String>::new(), 0);
        assert_eq!(result.total_rows, 0);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next);
        assert!(!result.has_previous);
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let filter = Filter::new(2, 7);
        let first = filter.paginate(vec![1, 2, 3], 20);
        let second = filter.paginate(vec![1, 2, 3], 20);
        assert_eq!(first.total_pages, second.total_pages);
        assert_eq!(first.total_rows, second.total_rows);
        assert_eq!(first.page, second.page);
    }

    #[test]
    fn test_order_by_enforces_allow_list() {
        let allowed = &["id", "created_at", "email"];

        let filter = Filter::default();
        assert_eq!(filter.order_by(allowed, "created_at").unwrap(), "created_at");

        let filter = Filter::default().sorted_by("email", SortDirection::Desc);
        assert_eq!(filter.order_by(allowed, "created_at").unwrap(), "email");

        let filter = Filter::default().sorted_by("email; DROP TABLE users", SortDirection::Asc);
        let err = filter.order_by(allowed, "created_at").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_direction_sql_keywords() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
