//! User route group, mounted under `/api`.

use axum::Router;

use crate::api::documents::resource_router;
use crate::http::AppState;

pub const COLLECTION: &str = "usuarios";

pub fn router() -> Router<AppState> {
    Router::new().nest("/usuarios", resource_router(COLLECTION))
}
