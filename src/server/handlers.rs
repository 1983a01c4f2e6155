//! HTTP handlers for mounted list views

use crate::config::ViewConfig;
use crate::core::{
    ActionError, ActionKind, ActionRunner, ListItem, ListView, ListViewError, PaginatedResponse,
    QueryParams, SourceAdapter,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state of one mounted view
pub struct ViewState<T: ListItem> {
    pub config: Arc<ViewConfig>,
    pub source: Arc<SourceAdapter<T>>,
    pub actions: Option<Arc<ActionRunner<T>>>,
}

/// List a page of items
///
/// GET /{view}?page=&limit=&search=&filter=&sort=
pub async fn list_items<T>(
    State(state): State<Arc<ViewState<T>>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PaginatedResponse<T>>, ListViewError>
where
    T: ListItem + Serialize,
{
    let mut view = ListView::new(Arc::clone(&state.config));
    view.apply_query(&params)?;

    let snapshot = state.source.snapshot()?;
    let render = view.render(&snapshot);

    Ok(Json(render.into_response()))
}

/// Reload the view's items from its source
///
/// POST /{view}/refresh
pub async fn refresh_items<T>(
    State(state): State<Arc<ViewState<T>>>,
) -> Result<Json<Value>, ListViewError>
where
    T: ListItem,
{
    let loaded = state.source.refetch().await?;
    Ok(Json(json!({ "loaded": loaded })))
}

/// Run an action on one item
///
/// POST /{view}/{id}/{action}
pub async fn run_action<T>(
    State(state): State<Arc<ViewState<T>>>,
    Path((id, action)): Path<(String, String)>,
) -> Result<StatusCode, ListViewError>
where
    T: ListItem,
{
    let kind: ActionKind = action.parse()?;
    let runner = state
        .actions
        .as_ref()
        .ok_or_else(|| ActionError::Unsupported {
            action: kind.to_string(),
        })?;

    runner.run(kind, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "listview-rs"
    }))
}
