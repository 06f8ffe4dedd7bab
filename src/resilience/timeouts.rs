//! Request deadline enforcement.
//!
//! # Responsibilities
//! - Bound the time a request may spend in handlers
//! - Drop the handler future when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - An elapsed deadline is an `AppError`, so it is rendered by the error
//!   translation stage like any other failure

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::AppError;

/// Middleware running the rest of the stack under `limit`.
pub async fn enforce_deadline(State(limit): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_secs = limit.as_secs(), "Request deadline elapsed");
            AppError::TimedOut(limit).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::http::ErrorReport;

    fn router() -> Router {
        Router::new()
            .route("/fast", get(|| async { "done" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "late"
                }),
            )
            .layer(middleware::from_fn_with_state(Duration::from_secs(30), enforce_deadline))
    }

    fn request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_deadline_reports_error() {
        let response = router().oneshot(request("/slow")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.message, "request timed out after 30s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_request_passes_through() {
        let response = router().oneshot(request("/fast")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.extensions().get::<ErrorReport>().is_none());
    }
}
