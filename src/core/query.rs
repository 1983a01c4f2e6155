//! Query parameters and pagination metadata

use crate::core::paginate::total_pages;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for pagination, search, filtering and sorting
///
/// This structure is used to extract list-view parameters from URL query
/// strings. All parameters have sensible defaults.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_items(
///     Query(params): Query<QueryParams>,
/// ) -> Json<PaginatedResponse<Product>> {
///     // params.page defaults to 1
///     // params.limit defaults to the view's page size
/// }
///
/// // Usage:
/// GET /products?page=2&limit=10
/// GET /products?search=lamp&filter={"category": "lighting"}
/// GET /products?filter={"price>": 100}&sort=created_at:desc
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page, `None` for the view default
    pub limit: Option<usize>,

    /// Free-text search term
    pub search: Option<String>,

    /// Filters as JSON object
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}`
    /// - Comparison: `{"field>": value, "field<": value, "field>=": value, "field<=": value}`
    pub filter: Option<String>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, falling back to `default` and clamped to `[1, max]`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Parse filter JSON string into Value
    ///
    /// Returns `Ok(None)` when no filter was given.
    pub fn filter_value(&self) -> Result<Option<Value>, serde_json::Error> {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some),
        }
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state
/// and the resolved view status.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The rows of the current page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,

    /// `loading`, `error`, `empty` or `ready`
    pub status: &'static str,

    /// Error message when status is `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// `no_data` or `no_matches` when status is `empty`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<&'static str>,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Page actually shown (starts at 1)
    pub page: usize,

    /// Page that was asked for, before clamping
    pub requested_page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// 1-based index of the first item shown, 0 when nothing is shown
    pub from: usize,

    /// 1-based index of the last item shown, 0 when nothing is shown
    pub to: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata, clamping `page` into range
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let requested_page = page.max(1);
        let total_pages = total_pages(total, limit);
        let page = requested_page.min(total_pages);
        let start = (page - 1) * limit;
        let end = (start + limit).min(total);
        let (from, to) = if end > start { (start + 1, end) } else { (0, 0) };

        Self {
            page,
            requested_page,
            limit,
            total,
            total_pages,
            from,
            to,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// True when `requested_page` was out of range
    pub fn was_clamped(&self) -> bool {
        self.page != self.requested_page
    }
}
