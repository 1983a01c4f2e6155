//! Data source adapter: owns the fetched items and the loading/error flags

use crate::core::error::{ListViewError, SourceError};
use crate::core::item::ListItem;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Service trait for fetching the items of a list view
///
/// Implementations wrap whatever backs the view (a REST client, a store,
/// a fixture). Every fetch returns the complete item set.
#[async_trait]
pub trait DataSource<T: ListItem>: Send + Sync {
    /// Fetch all items
    async fn fetch(&self) -> Result<Vec<T>>;
}

/// Immutable view of the source at one point in time
#[derive(Debug, Clone)]
pub struct SourceSnapshot<T> {
    pub items: Arc<Vec<T>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> SourceSnapshot<T> {
    /// Loaded items, no error
    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            is_loading: false,
            error: None,
        }
    }

    /// Nothing loaded yet, fetch in flight
    pub fn loading() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            is_loading: true,
            error: None,
        }
    }

    /// Last fetch failed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            is_loading: false,
            error: Some(message.into()),
        }
    }
}

struct SourceState<T> {
    items: Arc<Vec<T>>,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
}

/// Clears the loading flag when a fetch is abandoned before it completes
///
/// A `refetch` future dropped mid-fetch must not leave the adapter loading.
struct FetchInFlight<'a, T> {
    state: &'a RwLock<SourceState<T>>,
    generation: u64,
    finished: bool,
}

impl<T> Drop for FetchInFlight<'_, T> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let Ok(mut state) = self.state.write() else {
            return;
        };
        if state.generation == self.generation {
            state.is_loading = false;
            tracing::debug!(generation = self.generation, "fetch abandoned");
        }
    }
}

/// Holds the current items of a [`DataSource`] plus loading/error flags
///
/// Items are replaced wholesale on each successful fetch. A failed fetch
/// records its error and keeps the previous items. When fetches overlap,
/// only the most recently started one is applied, and an optimistic removal
/// invalidates every fetch started before it.
pub struct SourceAdapter<T: ListItem> {
    source: Arc<dyn DataSource<T>>,
    state: RwLock<SourceState<T>>,
}

impl<T: ListItem> SourceAdapter<T> {
    /// Create an adapter with no items; nothing is fetched until [`refetch`](Self::refetch)
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            source,
            state: RwLock::new(SourceState {
                items: Arc::new(Vec::new()),
                is_loading: false,
                error: None,
                generation: 0,
            }),
        }
    }

    /// Current items and flags
    pub fn snapshot(&self) -> Result<SourceSnapshot<T>, ListViewError> {
        let state = self
            .state
            .read()
            .map_err(|_| ListViewError::lock_poisoned("source"))?;
        Ok(SourceSnapshot {
            items: Arc::clone(&state.items),
            is_loading: state.is_loading,
            error: state.error.clone(),
        })
    }

    /// Fetch from the source and replace the items
    ///
    /// Returns the number of items loaded. On failure the error is both
    /// recorded in the snapshot and returned. A result that was overtaken by
    /// a later refetch is discarded.
    pub async fn refetch(&self) -> Result<usize, ListViewError> {
        let generation = {
            let mut state = self
                .state
                .write()
                .map_err(|_| ListViewError::lock_poisoned("source"))?;
            state.generation += 1;
            state.is_loading = true;
            state.generation
        };
        let mut in_flight = FetchInFlight {
            state: &self.state,
            generation,
            finished: false,
        };

        let fetched = self.source.fetch().await;
        in_flight.finished = true;

        let mut state = self
            .state
            .write()
            .map_err(|_| ListViewError::lock_poisoned("source"))?;
        if state.generation != generation {
            tracing::debug!(
                generation,
                latest = state.generation,
                "stale fetch discarded"
            );
            return Ok(state.items.len());
        }
        state.is_loading = false;

        match fetched {
            Ok(items) => {
                let count = items.len();
                state.items = Arc::new(items);
                state.error = None;
                tracing::debug!(count, "items loaded");
                Ok(count)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "fetch failed");
                state.error = Some(message.clone());
                Err(SourceError::FetchFailed { message }.into())
            }
        }
    }

    /// Remove an item locally without refetching
    ///
    /// Returns whether an item was removed. A removal discards any fetch
    /// still in flight, since its result predates the removal.
    pub fn remove_optimistic(&self, id: &str) -> Result<bool, ListViewError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ListViewError::lock_poisoned("source"))?;
        let before = state.items.len();
        let remaining: Vec<T> = state
            .items
            .iter()
            .filter(|item| item.item_id() != id)
            .cloned()
            .collect();
        let removed = remaining.len() != before;
        if removed {
            state.items = Arc::new(remaining);
            state.generation += 1;
            state.is_loading = false;
            tracing::debug!(id, "item removed optimistically");
        }
        Ok(removed)
    }
}
