//! View-status resolution

/// What a list view should show for the current render pass
///
/// Derived from the source flags and counts on every render, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewStatus<T> {
    /// A fetch is in flight
    Loading,
    /// The last fetch failed; recoverable only by an explicit retry
    Error(String),
    /// Nothing survived the filters
    Empty,
    /// Rows of the current page
    Ready(Vec<T>),
}

impl<T> ViewStatus<T> {
    pub fn name(&self) -> &'static str {
        match self {
            ViewStatus::Loading => "loading",
            ViewStatus::Error(_) => "error",
            ViewStatus::Empty => "empty",
            ViewStatus::Ready(_) => "ready",
        }
    }

    /// Rows to display, empty unless ready
    pub fn items(&self) -> &[T] {
        match self {
            ViewStatus::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ViewStatus::Ready(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready(_))
    }
}

/// Which empty-state copy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The source has no items at all
    NoData,
    /// Items exist but the active criteria excluded all of them
    NoMatches,
}

impl EmptyKind {
    pub fn for_counts(source_count: usize, criteria_active: bool) -> Self {
        if source_count > 0 && criteria_active {
            EmptyKind::NoMatches
        } else {
            EmptyKind::NoData
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EmptyKind::NoData => "no_data",
            EmptyKind::NoMatches => "no_matches",
        }
    }
}

/// Resolve the status of a render pass
///
/// Priority: `Loading` over `Error` over `Empty`. `Empty` is reported when
/// nothing is left after filtering. Pure: never retries or fetches.
pub fn resolve_status<T>(
    is_loading: bool,
    error: Option<&str>,
    page_items: Vec<T>,
    filtered_total: usize,
) -> ViewStatus<T> {
    if is_loading {
        return ViewStatus::Loading;
    }
    if let Some(message) = error {
        return ViewStatus::Error(message.to_string());
    }
    if filtered_total == 0 {
        return ViewStatus::Empty;
    }
    ViewStatus::Ready(page_items)
}
