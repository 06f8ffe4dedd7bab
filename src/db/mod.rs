//! Document database subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ServerConfig.database → connector.rs (MongoConnector)
//!     ServerConfig.retry    → resilience::RetryPolicy
//!     → supervisor.rs (ConnectionManager, spawned campaign)
//!
//! Request time:
//!     handler → AppState.database → ConnectionManager::handle()
//!         Some(client) → query
//!         None         → AppError::DatabaseUnavailable
//! ```
//!
//! # Design Decisions
//! - The HTTP listener never waits for the database
//! - Connection failures stay in the operational log; clients only see
//!   failures of requests that needed the database

pub mod connector;
pub mod supervisor;

pub use connector::{redact_uri, Connector, DbError, MongoConnector};
pub use supervisor::{ConnectOutcome, ConnectionManager, ConnectionState};

/// The manager type used by the running service.
pub type DatabaseManager = ConnectionManager<MongoConnector>;
