//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the liveness/readiness endpoints
//! - Mount the user and license route groups
//! - Wire up middleware (CORS, error translation, limits, tracing, request ID)
//! - Serve until the shutdown signal
//!
//! # Layer Order (outermost first)
//! ```text
//! SetRequestId → Trace → PropagateRequestId → metrics
//!     → CORS (OPTIONS answered here)
//!     → error translation
//!     → request deadline
//!     → body limit → panic capture → routes
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::db::DatabaseManager;
use crate::http::cors::cors;
use crate::http::error::{panic_response, translate_errors};
use crate::http::health::{liveness, readiness};
use crate::http::state::AppState;
use crate::observability::metrics;
use crate::resilience::enforce_deadline;
use crate::routing::{mount, RouteGroups};

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    pub fn new(config: Arc<ServerConfig>, database: Arc<DatabaseManager>, routes: RouteGroups) -> Self {
        let state = AppState::new(config.clone(), database);
        let router = Self::build_router(&config, state, routes);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState, routes: RouteGroups) -> Router {
        Router::new()
            .route("/", get(liveness))
            .route("/health", get(readiness))
            .merge(mount(routes))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(middleware::from_fn_with_state(
                Duration::from_secs(config.timeouts.request_secs),
                enforce_deadline,
            ))
            .layer(middleware::from_fn_with_state(config.environment, translate_errors))
            .layer(middleware::from_fn(cors))
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .with_state(state)
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, port = addr.port(), "Server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
