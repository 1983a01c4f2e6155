//! The list-view state machine: filter -> sort -> paginate -> status

use crate::config::ViewConfig;
use crate::core::error::{ListViewError, QueryError};
use crate::core::field::FieldValue;
use crate::core::filter::{Comparison, FilterCriteria, filter};
use crate::core::item::ListItem;
use crate::core::paginate::{PageState, paginate};
use crate::core::query::{PaginatedResponse, PaginationMeta, QueryParams};
use crate::core::sort::{SortDirection, SortSpec, sort};
use crate::core::source::SourceSnapshot;
use crate::core::status::{EmptyKind, ViewStatus, resolve_status};
use std::sync::Arc;

/// Output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct ListRender<T> {
    /// What to show; `Ready` carries the current page's rows
    pub status: ViewStatus<T>,

    /// Page window over the filtered, sorted items
    pub pagination: PaginationMeta,

    /// Items surviving the filters
    pub filtered_count: usize,

    /// Items in the source before filtering
    pub source_count: usize,

    /// Which empty-state copy applies, set only when status is `Empty`
    pub empty_kind: Option<EmptyKind>,
}

impl<T> ListRender<T> {
    /// Map the page's rows to display rows
    pub fn rows<R>(&self, render_row: impl Fn(&T) -> R) -> Vec<R> {
        self.status.items().iter().map(render_row).collect()
    }

    /// "Showing X–Y of N"
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.pagination.from, self.pagination.to, self.pagination.total
        )
    }

    /// Convert into the HTTP response body
    pub fn into_response(self) -> PaginatedResponse<T> {
        let status = self.status.name();
        let error = self.status.error().map(str::to_string);
        PaginatedResponse {
            status,
            error,
            empty: self.empty_kind.map(EmptyKind::name),
            pagination: self.pagination,
            data: self.status.into_items(),
        }
    }
}

/// Filter, sort and page state of one configured list view
///
/// The view holds no items: every [`render`](Self::render) runs the full
/// pipeline against a source snapshot. Changing search, filters or sort
/// returns to page 1; changing the page size keeps the first visible item
/// on screen.
///
/// # Example
/// ```rust,ignore
/// let mut view = ListView::new(config.require_view("products")?.clone());
/// view.set_search("lamp");
/// view.set_sort(Some("price"), SortDirection::Desc)?;
/// let render = view.render(&adapter.snapshot()?);
/// println!("{}", render.summary());
/// ```
#[derive(Debug, Clone)]
pub struct ListView {
    config: Arc<ViewConfig>,
    criteria: FilterCriteria,
    sort: SortSpec,
    page: PageState,
}

impl ListView {
    pub fn new(config: impl Into<Arc<ViewConfig>>) -> Self {
        let config = config.into();
        Self {
            criteria: FilterCriteria::new(&config.search_fields),
            sort: config.default_sort_spec(),
            page: PageState::new(config.page_size, 1),
            config,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Set the free-text term
    pub fn set_search(&mut self, term: &str) {
        self.update_criteria(|criteria| criteria.set_search(term));
    }

    /// Require a configured filter field to equal `value`; blank clears it
    pub fn set_filter(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), ListViewError> {
        self.check_filterable(field)?;
        let value = value.into();
        self.update_criteria(|criteria| criteria.set_equals(field, value));
        Ok(())
    }

    /// Bound a configured filter field numerically
    pub fn set_range(
        &mut self,
        field: &str,
        op: Comparison,
        bound: f64,
    ) -> Result<(), ListViewError> {
        self.check_filterable(field)?;
        self.update_criteria(|criteria| criteria.set_range(field, op, bound));
        Ok(())
    }

    /// Drop every constraint on one field
    pub fn clear_filter(&mut self, field: &str) {
        self.update_criteria(|criteria| criteria.remove(field));
    }

    /// Drop search and every filter
    pub fn clear_filters(&mut self) {
        self.update_criteria(FilterCriteria::clear);
    }

    /// Replace all criteria at once (validated against the view)
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), ListViewError> {
        let fields: Vec<String> = criteria.constrained_fields().map(str::to_string).collect();
        for field in &fields {
            self.check_filterable(field)?;
        }
        self.update_criteria(|current| *current = criteria);
        Ok(())
    }

    /// Sort by a configured key; `None` restores the input order
    pub fn set_sort(
        &mut self,
        key: Option<&str>,
        direction: SortDirection,
    ) -> Result<(), ListViewError> {
        let spec = match key {
            Some(key) => self.config.sort_spec(key, direction)?,
            None => SortSpec::none(),
        };
        self.update_sort(spec);
        Ok(())
    }

    /// Header-click behaviour: same key flips direction, a new key starts ascending
    pub fn toggle_sort(&mut self, key: &str) -> Result<(), ListViewError> {
        let spec = self.config.sort_spec(key, SortDirection::Asc)?;
        let direction = if self.sort.key == spec.key {
            self.sort.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.update_sort(SortSpec { direction, ..spec });
        Ok(())
    }

    /// Go to a page; out-of-range pages are clamped on the next render
    pub fn set_page(&mut self, page: usize) {
        self.page = self.page.with_page(page);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.current_page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.current_page().saturating_sub(1));
    }

    /// Change rows per page, keeping the first visible item on screen
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page = self.page.resized(page_size.min(self.config.max_page_size));
    }

    /// Back to the configured initial state
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.config));
    }

    /// Apply URL query parameters
    ///
    /// Search, filter and sort are applied first (each resetting to page 1),
    /// then the requested page and limit.
    pub fn apply_query(&mut self, params: &QueryParams) -> Result<(), ListViewError> {
        let mut criteria = match params.filter_value() {
            Ok(Some(value)) => FilterCriteria::from_json(&self.config.search_fields, &value)?,
            Ok(None) => FilterCriteria::new(&self.config.search_fields),
            Err(e) => {
                return Err(QueryError::InvalidFilter {
                    message: e.to_string(),
                }
                .into());
            }
        };
        if let Some(term) = &params.search {
            criteria.set_search(term);
        }
        self.set_criteria(criteria)?;

        if let Some(expr) = &params.sort {
            let spec = self.config.parse_sort(expr)?;
            self.update_sort(spec);
        }

        let limit = params.limit(self.config.page_size, self.config.max_page_size);
        self.page = PageState::new(limit, params.page());
        Ok(())
    }

    /// Run the pipeline against a snapshot
    ///
    /// Unless the source is loading, the stored page is clamped to the page
    /// actually shown, so a later `next_page` continues from a valid page.
    pub fn render<T: ListItem>(&mut self, snapshot: &SourceSnapshot<T>) -> ListRender<T> {
        let filtered = filter(snapshot.items.as_slice(), &self.criteria);
        let sorted = sort(&*filtered, &self.sort);
        let page = paginate(&sorted, self.page);

        if !snapshot.is_loading {
            self.page = self.page.with_page(page.meta.page);
        }

        let status = resolve_status(
            snapshot.is_loading,
            snapshot.error.as_deref(),
            page.items.to_vec(),
            sorted.len(),
        );
        let empty_kind = matches!(status, ViewStatus::Empty)
            .then(|| EmptyKind::for_counts(snapshot.items.len(), self.criteria.is_active()));

        tracing::trace!(
            view = %self.config.name,
            status = status.name(),
            source = snapshot.items.len(),
            filtered = sorted.len(),
            page = page.meta.page,
            "list rendered"
        );

        ListRender {
            status,
            pagination: page.meta,
            filtered_count: sorted.len(),
            source_count: snapshot.items.len(),
            empty_kind,
        }
    }

    fn check_filterable(&self, field: &str) -> Result<(), QueryError> {
        if self.config.is_filterable(field) {
            Ok(())
        } else {
            Err(QueryError::UnknownFilterField {
                view: self.config.name.clone(),
                field: field.to_string(),
            })
        }
    }

    fn update_criteria(&mut self, change: impl FnOnce(&mut FilterCriteria)) {
        let before = self.criteria.clone();
        change(&mut self.criteria);
        if self.criteria != before {
            self.page = self.page.with_page(1);
        }
    }

    fn update_sort(&mut self, spec: SortSpec) {
        if self.sort != spec {
            self.sort = spec;
            self.page = self.page.with_page(1);
        }
    }
}
