//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → cors.rs (stamp headers, answer OPTIONS)
//!     → [routing::mount picks the user or license group]
//!     → handler returns Ok(response) or Err(AppError)
//!     → error.rs (log, render JSON envelope)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod health;
pub mod server;
pub mod state;

pub use error::{AppError, ErrorBody, ErrorReport};
pub use server::HttpServer;
pub use state::AppState;
