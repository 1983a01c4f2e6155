//! Core module containing the list-view pipeline and its collaborators

pub mod actions;
pub mod error;
pub mod field;
pub mod filter;
pub mod item;
pub mod notify;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod source;
pub mod status;
pub mod view;

pub use actions::{ActionKind, ActionRunner, ActionTarget, ItemActions, UpdatePolicy};
pub use error::{ActionError, ConfigError, ListViewError, QueryError, SourceError};
pub use field::{FieldValue, SortKind};
pub use filter::{Comparison, FilterCriteria, filter};
pub use item::{ListItem, Record};
pub use notify::{MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use paginate::{Page, PageState, paginate};
pub use query::{PaginatedResponse, PaginationMeta, QueryParams};
pub use sort::{SortDirection, SortSpec, sort};
pub use source::{DataSource, SourceAdapter, SourceSnapshot};
pub use status::{EmptyKind, ViewStatus, resolve_status};
pub use view::{ListRender, ListView};
