//! Request error translation.
//!
//! Handlers and extractors never write error bodies. They return
//! [`AppError`] (or panic); the error value becomes a bare 500 carrying an
//! [`ErrorReport`] extension, and [`translate_errors`], which wraps every
//! route, logs the report and renders the JSON envelope.

use std::any::Any;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Request, State,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::Environment;

/// Fixed `error` label of the envelope.
pub const ERROR_LABEL: &str = "Error interno del servidor";

/// `message` used in production instead of the real detail.
pub const PRODUCTION_MESSAGE: &str = "Algo salió mal";

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The supervisor has not connected yet.
    #[error("database connection is not ready")]
    DatabaseUnavailable,

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    #[error("invalid document id '{0}'")]
    InvalidId(String),

    /// The JSON body could not be read or parsed.
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),

    /// A path parameter could not be decoded.
    #[error(transparent)]
    MalformedPath(#[from] PathRejection),

    #[error("request timed out after {}s", .0.as_secs())]
    TimedOut(std::time::Duration),

    #[error("{0}")]
    Internal(String),

    #[error("handler panicked: {0}")]
    Panic(String),
}

/// What went wrong, attached to the response of a failed request.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Display text; shown to clients outside production.
    pub message: String,
    /// Debug representation; only ever logged.
    pub detail: String,
}

impl From<&AppError> for ErrorReport {
    fn from(error: &AppError) -> Self {
        Self {
            message: error.to_string(),
            detail: format!("{error:?}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(ErrorReport::from(&self));
        response
    }
}

/// JSON body sent for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn render(report: &ErrorReport, environment: Environment) -> Self {
        let message = if environment.is_production() {
            PRODUCTION_MESSAGE.to_string()
        } else {
            report.message.clone()
        };
        Self {
            error: ERROR_LABEL,
            message,
        }
    }
}

/// Middleware turning reported failures into the JSON envelope.
pub async fn translate_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    tracing::error!(
        method = %method,
        path = %path,
        error = %report.message,
        detail = %report.detail,
        "Request failed"
    );

    let body = ErrorBody::render(&report, environment);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// `CatchPanicLayer` handler; routes panics through the same translation.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Panic(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ErrorReport {
        ErrorReport::from(&AppError::Internal("license store offline".into()))
    }

    #[test]
    fn test_development_discloses_message() {
        let body = ErrorBody::render(&report(), Environment::Development);
        assert_eq!(body.error, ERROR_LABEL);
        assert_eq!(body.message, "license store offline");
    }

    #[test]
    fn test_production_hides_message() {
        let body = ErrorBody::render(&report(), Environment::Production);
        assert_eq!(body.error, ERROR_LABEL);
        assert_eq!(body.message, PRODUCTION_MESSAGE);
    }

    #[test]
    fn test_error_response_is_bare_until_translated() {
        let response = AppError::DatabaseUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "database connection is not ready");
        assert_eq!(report.detail, "DatabaseUnavailable");
    }

    #[test]
    fn test_panic_payloads_become_reports() {
        let response = panic_response(Box::new("boom"));
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "handler panicked: boom");

        let response = panic_response(Box::new(String::from("kaboom")));
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "handler panicked: kaboom");
    }
}
