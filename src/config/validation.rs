//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks the values. All
//! problems are collected and returned together, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.base_url: {0}")]
    InvalidUpstream(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("upstream.timeout_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamOutlivesRequest { upstream: u64, request: u64 },

    #[error("observability.log_level: unknown level {0:?}")]
    UnknownLogLevel(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if let Err(reason) = check_upstream_url(&config.upstream.base_url) {
        errors.push(ValidationError::InvalidUpstream(reason));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    // The upstream deadline has to expire first, or the caller sees the
    // request timeout instead of the upstream one.
    if config.timeouts.request_secs > 0
        && config.upstream.timeout_secs >= config.timeouts.request_secs
    {
        errors.push(ValidationError::UpstreamOutlivesRequest {
            upstream: config.upstream.timeout_secs,
            request: config.timeouts.request_secs,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The upstream is reached over plain HTTP/1 and gets path segments
/// appended, so it must be an `http` URL with a host and nothing after
/// the path.
fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("{raw:?}: {e}"))?;
    if url.scheme() != "http" {
        return Err(format!("{raw:?}: scheme must be http, got {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err(format!("{raw:?}: missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(format!("{raw:?}: query and fragment are not allowed"));
    }
    Ok(())
}
