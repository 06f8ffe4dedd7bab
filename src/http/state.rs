//! Application state injected into handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::DatabaseManager;
use crate::http::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub database: Arc<DatabaseManager>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>, database: Arc<DatabaseManager>) -> Self {
        Self { config, database }
    }

    /// The working database, or `DatabaseUnavailable` until the supervisor
    /// has connected.
    pub fn database(&self) -> Result<mongodb::Database, AppError> {
        let client = self.database.handle().ok_or(AppError::DatabaseUnavailable)?;
        Ok(client
            .default_database()
            .unwrap_or_else(|| client.database(&self.config.database.name)))
    }
}
