//! Typed error handling for list views
//!
//! The pipeline stages themselves never fail: malformed item data degrades to
//! "does not match" or "sorts lowest". Errors only arise at the edges:
//!
//! - [`ConfigError`]: view configuration could not be loaded or is inconsistent
//! - [`QueryError`]: a filter/sort request names something the view does not support
//! - [`SourceError`]: the data source adapter failed to fetch
//! - [`ActionError`]: a mutation collaborator failed or is not available
//!
//! # Example
//!
//! ```rust,ignore
//! match view.set_sort(Some("weight"), SortDirection::Asc) {
//!     Ok(()) => {}
//!     Err(ListViewError::Query(QueryError::UnknownSortKey { key, .. })) => {
//!         println!("cannot sort by {}", key);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for list views
#[derive(Debug, Error)]
pub enum ListViewError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid filter/sort/page requests
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Data source errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Mutation errors
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Internal errors (poisoned locks and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ListViewError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListViewError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListViewError::Query(_) => StatusCode::BAD_REQUEST,
            ListViewError::Source(_) => StatusCode::BAD_GATEWAY,
            ListViewError::Action(e) => e.status_code(),
            ListViewError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListViewError::Config(_) => "CONFIG_ERROR",
            ListViewError::Query(e) => e.error_code(),
            ListViewError::Source(_) => "SOURCE_ERROR",
            ListViewError::Action(e) => e.error_code(),
            ListViewError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }

    pub(crate) fn lock_poisoned(what: &str) -> Self {
        ListViewError::Internal(format!("{what} lock poisoned"))
    }
}

impl IntoResponse for ListViewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to view configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// Failed to parse a configuration file
    #[error("Failed to parse config file '{file}': {message}")]
    ParseFile { file: String, message: String },

    /// Configuration file could not be read
    #[error("Failed to read config file '{file}': {message}")]
    Io { file: String, message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}' in view '{view}': {message}")]
    InvalidValue {
        view: String,
        field: String,
        value: String,
        message: String,
    },

    /// Two views share a name
    #[error("View '{name}' is defined more than once")]
    DuplicateView { name: String },

    /// A view was requested that is not configured
    #[error("Unknown view: {name}")]
    UnknownView { name: String },
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors related to filter/sort requests
#[derive(Debug, Error)]
pub enum QueryError {
    /// Filter expression is not a JSON object or has a bad value
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    /// Sort expression could not be parsed
    #[error("Invalid sort expression '{expr}': expected 'field' or 'field:asc|desc'")]
    InvalidSort { expr: String },

    /// Sort key is not configured for the view
    #[error("View '{view}' cannot be sorted by '{key}'")]
    UnknownSortKey { view: String, key: String },

    /// Filter field is not configured for the view
    #[error("View '{view}' cannot be filtered by '{field}'")]
    UnknownFilterField { view: String, field: String },
}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidFilter { .. } => "INVALID_FILTER",
            QueryError::InvalidSort { .. } => "INVALID_SORT",
            QueryError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
            QueryError::UnknownFilterField { .. } => "UNKNOWN_FILTER_FIELD",
        }
    }
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors raised by the data source adapter
#[derive(Debug, Error)]
pub enum SourceError {
    /// The fetch failed; previous items are kept
    #[error("Failed to load items: {message}")]
    FetchFailed { message: String },
}

// =============================================================================
// Action Errors
// =============================================================================

/// Errors related to mutation collaborators
#[derive(Debug, Error)]
pub enum ActionError {
    /// Action name is not recognised
    #[error("Unknown action: {action}")]
    Unknown { action: String },

    /// The view has no collaborator for this action
    #[error("Action '{action}' is not available here")]
    Unsupported { action: String },

    /// The collaborator reported a failure
    #[error("Failed to {action} item '{id}': {message}")]
    Failed {
        action: String,
        id: String,
        message: String,
    },
}

impl ActionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Unknown { .. } => StatusCode::NOT_FOUND,
            ActionError::Unsupported { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ActionError::Failed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Unknown { .. } => "UNKNOWN_ACTION",
            ActionError::Unsupported { .. } => "ACTION_UNSUPPORTED",
            ActionError::Failed { .. } => "ACTION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_errors_are_bad_requests() {
        let err = ListViewError::from(QueryError::InvalidSort {
            expr: "price:sideways".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_SORT");
        assert!(err.to_string().contains("price:sideways"));
    }

    #[test]
    fn test_action_error_status_codes() {
        let unknown = ListViewError::from(ActionError::Unknown {
            action: "explode".to_string(),
        });
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

        let failed = ListViewError::from(ActionError::Failed {
            action: "delete".to_string(),
            id: "p-1".to_string(),
            message: "timeout".to_string(),
        });
        assert_eq!(failed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(failed.to_string(), "Failed to delete item 'p-1': timeout");
    }

    #[test]
    fn test_to_response() {
        let err = ListViewError::from(ConfigError::UnknownView {
            name: "orders".to_string(),
        });
        let response = err.to_response();
        assert_eq!(response.code, "CONFIG_ERROR");
        assert_eq!(response.message, "Unknown view: orders");
    }
}
