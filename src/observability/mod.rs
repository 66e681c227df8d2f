//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers / upstream client produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! The request ID set by the HTTP layer is carried on the request span, so
//! every event emitted while handling a request can be correlated.

pub mod logging;
pub mod metrics;
