//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Database connection attempt fails:
//!     → retries.rs (is another attempt allowed? how long to wait?)
//!     → db::supervisor sleeps, then tries again
//!
//! Request in flight:
//!     → timeouts.rs (deadline elapsed? → AppError::TimedOut)
//!     → http::error renders the envelope
//! ```
//!
//! # Design Decisions
//! - Policies are plain values; the caller owns the timer
//! - Every database attempt carries its own driver-level deadline

pub mod retries;
pub mod timeouts;

pub use retries::RetryPolicy;
pub use timeouts::enforce_deadline;
