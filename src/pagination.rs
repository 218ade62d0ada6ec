//! Page requests and paged results for list operations.
//!
//! Every list is keyed by entity ID; the default order is newest first.

use serde::Serialize;

use crate::config::PaginationConfig;

/// Sort direction on the entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
    /// Order on entity ID.
    pub direction: SortDirection,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(PaginationConfig::default().default_page_size)
    }
}

impl Pagination {
    /// Create new pagination parameters, newest first.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            direction: SortDirection::Desc,
        }
    }

    /// Create pagination for the first page with given limit.
    pub fn first(limit: i64) -> Self {
        Self::new(0, limit)
    }

    /// Create pagination for a zero-based page number.
    pub fn page(page: i64, size: i64) -> Self {
        Self::new(page.max(0).saturating_mul(size), size)
    }

    /// Change the sort direction.
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Clamp offset and limit into the configured bounds.
    ///
    /// A non-positive limit falls back to the default page size.
    pub fn clamped(self, config: &PaginationConfig) -> Self {
        let limit = if self.limit <= 0 {
            config.default_page_size
        } else {
            self.limit.min(config.max_page_size)
        };
        Self {
            offset: self.offset.max(0),
            limit,
            direction: self.direction,
        }
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// Build a result from a page of items and the request that produced it.
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len() as i64) < self.total
    }

    /// Get the next page pagination, or None if no more pages.
    pub fn next_page(&self) -> Option<Pagination> {
        if self.has_more() {
            Some(Pagination::new(
                self.offset.saturating_add(self.limit),
                self.limit,
            ))
        } else {
            None
        }
    }
}
