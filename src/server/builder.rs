//! ListRouterBuilder for mounting configured views as HTTP routes

use super::handlers::{ViewState, health_check, list_items, refresh_items, run_action};
use crate::config::ListViewsConfig;
use crate::core::{ActionRunner, ConfigError, ListItem, ListViewError, SourceAdapter};
use axum::Router;
use axum::routing::{get, post};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for a router serving every mounted list view
///
/// Each mounted view gets:
/// - GET /{view} - one page of filtered, sorted items
/// - POST /{view}/refresh - reload items from the source
/// - POST /{view}/{id}/{action} - run an item action
///
/// # Example
///
/// ```ignore
/// let app = ListRouterBuilder::new(ListViewsConfig::default_config())?
///     .mount("products", products, Some(product_actions))?
///     .mount("reviews", reviews, None)?
///     .build();
/// ```
pub struct ListRouterBuilder {
    config: ListViewsConfig,
    router: Router,
    mounted: HashSet<String>,
}

impl ListRouterBuilder {
    /// Create a builder over a validated configuration
    pub fn new(config: ListViewsConfig) -> Result<Self, ListViewError> {
        config.validate()?;
        Ok(Self {
            config,
            router: Router::new(),
            mounted: HashSet::new(),
        })
    }

    /// Mount a configured view over a source and optional actions
    pub fn mount<T>(
        mut self,
        view: &str,
        source: Arc<SourceAdapter<T>>,
        actions: Option<Arc<ActionRunner<T>>>,
    ) -> Result<Self, ListViewError>
    where
        T: ListItem + Serialize,
    {
        let config = Arc::new(self.config.require_view(view)?.clone());
        if !self.mounted.insert(config.name.clone()) {
            return Err(ConfigError::DuplicateView {
                name: config.name.clone(),
            }
            .into());
        }

        let base = format!("/{}", config.name);
        tracing::debug!(view = %config.name, actions = actions.is_some(), "mounting list view");

        let state = Arc::new(ViewState {
            config,
            source,
            actions,
        });
        let routes = Router::new()
            .route(&base, get(list_items::<T>))
            .route(&format!("{base}/refresh"), post(refresh_items::<T>))
            .route(&format!("{base}/{{id}}/{{action}}"), post(run_action::<T>))
            .with_state(state);

        self.router = self.router.merge(routes);
        Ok(self)
    }

    /// Names of the views mounted so far
    pub fn mounted(&self) -> impl Iterator<Item = &str> {
        self.mounted.iter().map(String::as_str)
    }

    /// Build the final router with health routes and request tracing
    pub fn build(self) -> Router {
        self.router
            .route("/health", get(health_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Serve the mounted views with graceful shutdown on SIGTERM or Ctrl+C
    ///
    /// # Example
    ///
    /// ```ignore
    /// ListRouterBuilder::new(config)?
    ///     .mount("products", products, Some(actions))?
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
