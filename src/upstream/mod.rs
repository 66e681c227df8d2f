//! Outbound calls to the upstream "v2" calculator.
//!
//! # Data Flow
//! ```text
//! calculator handler (add / mul)
//!     → client.rs (build GET <base>/v2/<op>/<operands>, copy headers)
//!     → upstream service
//!     → full body, relayed verbatim
//! ```
//!
//! One attempt per inbound request. No retry, no fallback, no circuit
//! breaking; the only resilience is a deadline on the whole exchange.

pub mod client;

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

pub use client::UpstreamClient;

/// Errors that can occur while talking to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The configured base URL plus path did not form a valid URI.
    #[error("upstream uri is invalid: {0}")]
    InvalidUri(String),

    /// Connection refused, reset, DNS failure and the like.
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("upstream body could not be read: {0}")]
    Body(axum::Error),

    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUri(_) => "invalid_uri",
            UpstreamError::Request(_) => "request",
            UpstreamError::Status(_) => "status",
            UpstreamError::Body(_) => "body",
            UpstreamError::Timeout(_) => "timeout",
        }
    }
}
