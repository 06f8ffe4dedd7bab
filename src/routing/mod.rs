//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     /                   → http::health::liveness
//!     /health             → http::health::readiness
//!     /api/licencias/...  → license group
//!     /api/...            → user group
//!     anything else       → 404 (still carries CORS headers)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Route groups are injected, so tests and the binary can mount different ones

pub mod mount;

pub use mount::{mount, RouteGroups, LICENSES_PREFIX, USERS_PREFIX};
