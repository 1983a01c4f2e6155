//! # listview-rs
//!
//! Client-side list views for a storefront: products, reviews and wishlist
//! entries shown as filterable, sortable, paginated lists.
//!
//! ## Features
//!
//! - **Pipeline**: filter → sort → paginate → view status, all pure functions
//! - **Configuration-Based**: searchable, filterable and sortable fields per view via YAML
//! - **Lenient Records**: backend payloads normalised into typed items
//! - **Source Adapter**: async fetch with loading/error flags and stale-fetch protection
//! - **Item Actions**: approve, delete, duplicate and friends, with notifications
//! - **HTTP Exposure**: each view mounted as an Axum route with query-string state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listview::prelude::*;
//!
//! let config = ListViewsConfig::default_config();
//! let store = Arc::new(InMemoryDataSource::new(products));
//! let source = Arc::new(SourceAdapter::new(store.clone()));
//! source.refetch().await?;
//!
//! let mut view = ListView::new(config.require_view("products")?.clone());
//! view.set_search("lamp");
//! view.set_sort(Some("price"), SortDirection::Desc)?;
//!
//! let render = view.render(&source.snapshot()?);
//! println!("{}", render.summary());
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Install a `tracing` subscriber honouring `RUST_LOG` (default `info`)
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Pipeline ===
    pub use crate::core::{
        filter::{Comparison, FilterCriteria, filter},
        paginate::{Page, PageState, paginate},
        sort::{SortDirection, SortSpec, sort},
        status::{EmptyKind, ViewStatus, resolve_status},
    };

    // === Items ===
    pub use crate::core::{
        field::{FieldValue, SortKind},
        item::{ListItem, Record},
    };
    pub use crate::entities::{Product, Review, ReviewStatus, WishlistEntry};

    // === View State ===
    pub use crate::core::{
        query::{PaginatedResponse, PaginationMeta, QueryParams},
        view::{ListRender, ListView},
    };

    // === Sources & Actions ===
    pub use crate::core::{
        actions::{ActionKind, ActionRunner, ActionTarget, ItemActions, UpdatePolicy},
        notify::{MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier},
        source::{DataSource, SourceAdapter, SourceSnapshot},
    };
    pub use crate::storage::InMemoryDataSource;

    // === Errors ===
    pub use crate::core::error::{
        ActionError, ConfigError, ListViewError, QueryError, SourceError,
    };

    // === Config ===
    pub use crate::config::{ListViewsConfig, SortKeyConfig, ViewConfig};

    // === Server ===
    pub use crate::server::ListRouterBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
