//! License route group, mounted under `/api/licencias`.

use axum::Router;

use crate::api::documents::resource_router;
use crate::http::AppState;

pub const COLLECTION: &str = "licencias";

pub fn router() -> Router<AppState> {
    resource_router(COLLECTION)
}
