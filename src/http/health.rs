//! Liveness and readiness endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::db::ConnectionState;
use crate::http::state::AppState;

/// Body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "API Autos funcionando";

/// `GET /`: answers as long as the process serves HTTP, whatever the
/// database is doing.
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub database: &'static str,
    pub attempts: u32,
}

/// `GET /health`: 200 once the database is connected, 503 before.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let connection = state.database.state();
    let (status, code) = match connection {
        ConnectionState::Connected => ("ok", StatusCode::OK),
        _ => ("degraded", StatusCode::SERVICE_UNAVAILABLE),
    };
    (
        code,
        Json(Readiness {
            status,
            database: connection.as_str(),
            attempts: state.database.attempts(),
        }),
    )
}
