//! Route group mounting.
//!
//! # Responsibilities
//! - Bind the user group under `/api`
//! - Bind the license group under `/api/licencias`
//!
//! # Design Decisions
//! - Groups are plain `Router<AppState>` values; the mount table knows nothing
//!   about what they contain
//! - Static segments win over captures, so `/api/licencias/...` never falls
//!   into a user route

use axum::Router;

use crate::http::state::AppState;

pub const USERS_PREFIX: &str = "/api";
pub const LICENSES_PREFIX: &str = "/api/licencias";

/// The two externally defined route collections.
pub struct RouteGroups {
    pub users: Router<AppState>,
    pub licenses: Router<AppState>,
}

impl RouteGroups {
    pub fn new(users: Router<AppState>, licenses: Router<AppState>) -> Self {
        Self { users, licenses }
    }
}

/// Compose both groups into one router.
pub fn mount(groups: RouteGroups) -> Router<AppState> {
    Router::new()
        .nest(USERS_PREFIX, groups.users)
        .nest(LICENSES_PREFIX, groups.licenses)
}
