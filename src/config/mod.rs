//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file named by CONFIG_FILE (loader.rs)
//!     → environment overrides: PORT, NODE_ENV, MONGODB_URI, ... (loader.rs)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_dotenv, load_from, ConfigError};
pub use schema::{
    DatabaseConfig, Environment, LimitsConfig, ListenerConfig, ObservabilityConfig, RetryConfig,
    ServerConfig, TimeoutConfig,
};
pub use validation::ValidationError;
