//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start the database connection campaign without waiting on it
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: metrics and bind errors are fatal
//! - Database errors are never fatal; the supervisor keeps retrying

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api;
use crate::config::ServerConfig;
use crate::db::{redact_uri, DatabaseManager, MongoConnector};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::resilience::RetryPolicy;

/// Error type for process startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bootstrap the service and run it until a termination signal.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let config = Arc::new(config);

    tracing::info!(
        port = config.listener.port,
        environment = ?config.environment,
        database = %redact_uri(&config.database.uri),
        retry_delay_ms = config.retry.delay_ms,
        "Configuration loaded"
    );
    if config.database.uri.trim().is_empty() {
        tracing::warn!("MONGODB_URI is not set; database requests will fail until it is");
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let database = Arc::new(DatabaseManager::new(
        MongoConnector::new(config.database.clone()),
        RetryPolicy::from(&config.retry),
    ));
    let supervisor = database.spawn(shutdown.subscribe());

    let server = HttpServer::new(config.clone(), database, api::route_groups());

    let address = format!("{}:{}", config.listener.host, config.listener.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let served = server.run(listener, shutdown.subscribe()).await;

    if !shutdown.is_requested() {
        tracing::warn!("HTTP server stopped without a shutdown signal");
        shutdown.trigger();
    }
    match supervisor.await {
        Ok(outcome) => tracing::debug!(?outcome, "Connection supervisor finished"),
        Err(error) => tracing::warn!(error = %error, "Connection supervisor task failed"),
    }

    served.map_err(StartupError::Serve)
}
