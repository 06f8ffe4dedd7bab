//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! HTTP requests additionally get:
//!     → tower-http TraceLayer spans
//!     → x-request-id correlation (set + propagated)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing in production
//! - Metrics are opt-in and cheap when disabled

pub mod logging;
pub mod metrics;
