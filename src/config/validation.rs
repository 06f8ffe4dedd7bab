//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, delays > 0)
//! - Check the connection string scheme when one is set
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - An empty connection string is valid; it surfaces later as a connection failure

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retry.delay_ms == 0 {
        errors.push(ValidationError::new("retry.delay_ms", "must be greater than zero"));
    }
    if config.retry.max_attempts == Some(0) {
        errors.push(ValidationError::new(
            "retry.max_attempts",
            "must be greater than zero when set",
        ));
    }

    if config.database.server_selection_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "database.server_selection_timeout_ms",
            "must be greater than zero",
        ));
    }
    if config.database.socket_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "database.socket_timeout_ms",
            "must be greater than zero",
        ));
    }
    let uri = config.database.uri.trim();
    if !uri.is_empty() && !(uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")) {
        errors.push(ValidationError::new(
            "database.uri",
            "must use the mongodb:// or mongodb+srv:// scheme",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new("limits.max_body_size", "must be greater than zero"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_uri_is_accepted() {
        let mut config = ServerConfig::default();
        config.database.uri = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ServerConfig::default();
        config.retry.delay_ms = 0;
        config.retry.max_attempts = Some(0);
        config.database.uri = "postgres://localhost/autos".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "retry.delay_ms",
                "retry.max_attempts",
                "database.uri",
                "observability.metrics_address",
            ]
        );
    }

    #[test]
    fn test_srv_scheme_is_accepted() {
        let mut config = ServerConfig::default();
        config.database.uri = "mongodb+srv://cluster0.example.net/autos".into();
        assert!(validate_config(&config).is_ok());
    }
}
