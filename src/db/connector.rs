//! Database connectors.
//!
//! # Responsibilities
//! - Establish one verified connection per call
//! - Apply the fixed driver option set (selection/socket timeouts)
//! - Describe the target without leaking credentials

use std::future::Future;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use url::Url;

use crate::config::DatabaseConfig;

/// Error type for connection attempts.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No connection string was configured.
    #[error("MONGODB_URI is not set")]
    MissingUri,
    /// The driver rejected the connection string or the server did not answer.
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Something that can open a connection to a database.
///
/// The supervisor only sees this trait, so tests can script failures
/// without a server.
pub trait Connector: Send + Sync + 'static {
    /// The live connection handed to request handlers.
    type Handle: Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Make one connection attempt.
    fn connect(&self) -> impl Future<Output = Result<Self::Handle, Self::Error>> + Send;

    /// Human-readable target for logs. Must not contain secrets.
    fn target(&self) -> String;
}

/// MongoDB connector.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: DatabaseConfig,
}

impl MongoConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    async fn build_options(&self) -> Result<ClientOptions, DbError> {
        let uri = self.config.uri.trim();
        if uri.is_empty() {
            return Err(DbError::MissingUri);
        }

        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(self.config.server_selection_timeout());
        // The driver has no per-read socket timeout; bound socket establishment instead.
        options.connect_timeout = Some(self.config.socket_timeout());
        if options.app_name.is_none() {
            options.app_name = self.config.app_name.clone();
        }
        Ok(options)
    }
}

impl Connector for MongoConnector {
    type Handle = Client;
    type Error = DbError;

    async fn connect(&self) -> Result<Client, DbError> {
        let options = self.build_options().await?;
        let client = Client::with_options(options)?;

        // Client construction is lazy; a ping forces server selection.
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        Ok(client)
    }

    fn target(&self) -> String {
        redact_uri(&self.config.uri)
    }
}

/// Strip the password from a connection string for logging.
pub fn redact_uri(uri: &str) -> String {
    let uri = uri.trim();
    if uri.is_empty() {
        return "<unset>".to_string();
    }

    match Url::parse(uri) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        }
        Err(_) => "<unparseable connection string>".to_string(),
    }
}
