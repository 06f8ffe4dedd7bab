//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::schema::{Environment, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Names the optional TOML file layered under the environment.
pub const CONFIG_FILE_VAR: &str = "CONFIG_FILE";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid .env file: {0}")]
    Dotenv(#[source] dotenvy::Error),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidVar { key: &'static str, value: String },
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `.env` from the working directory or its parents into the process
/// environment. Returns the file used, or `None` when there is none.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    absent_as_none(dotenvy::dotenv())
}

/// Load a specific env file; a missing file is `Ok(None)`.
pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    absent_as_none(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn absent_as_none(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, ConfigError> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(ConfigError::Dotenv(error)),
    }
}

/// Load and validate configuration from the process environment.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Load and validate configuration using `lookup` for environment variables.
///
/// Defaults, then the TOML file named by `CONFIG_FILE` (if any), then
/// individual variable overrides.
pub fn load_from<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let mut config = match lookup(CONFIG_FILE_VAR) {
        Some(path) => load_file(Path::new(path.trim()))?,
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML configuration file. Missing fields take their defaults.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        config.listener.host = host.trim().to_string();
    }
    if let Some(port) = parse_var(&lookup, "PORT")? {
        config.listener.port = port;
    }
    if let Some(mode) = lookup("NODE_ENV") {
        config.environment = Environment::from_name(&mode);
    }

    if let Some(uri) = lookup("MONGODB_URI") {
        config.database.uri = uri.trim().to_string();
    }
    if let Some(name) = lookup("MONGODB_DB") {
        config.database.name = name.trim().to_string();
    }

    if let Some(delay_ms) = parse_var(&lookup, "DB_RETRY_DELAY_MS")? {
        config.retry.delay_ms = delay_ms;
    }
    if let Some(max_attempts) = parse_var(&lookup, "DB_RETRY_MAX_ATTEMPTS")? {
        config.retry.max_attempts = Some(max_attempts);
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level.trim().to_string();
    }
    if let Some(addr) = lookup("METRICS_ADDR") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = addr.trim().to_string();
    }

    Ok(())
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { key, value }),
        None => Ok(None),
    }
}
