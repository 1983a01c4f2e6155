//! HTTP exposure of list views
//!
//! `ListRouterBuilder` mounts each configured view under `/{view}` with
//! query-string paging, search, filter and sort, plus action routes.

pub mod builder;
pub mod handlers;

pub use builder::ListRouterBuilder;
pub use handlers::ViewState;
