//! Autos API
//!
//! HTTP entrypoint for the user and license services, backed by MongoDB.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ cors ──▶ error translation ──▶ /            liveness
//!                                                ├─▶ /health      readiness
//!                                                ├─▶ /api/...     user group
//!                                                └─▶ /api/licencias/...  license group
//!                                                          │
//!                                                          ▼
//!                                              db::ConnectionManager ◀── supervisor
//!                                                                        (retry every 5 s)
//! ```

// Core subsystems
pub mod api;
pub mod config;
pub mod db;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
