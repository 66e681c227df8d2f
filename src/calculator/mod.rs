//! Calculator service.
//!
//! # Data Flow
//! ```text
//! GET /<op>/<a>/<b>
//!     → operation.rs (name → Operation, Operation → Route)
//!     → Route::Local    → local.rs (sub, div)
//!     → Route::Upstream → upstream client (add, mul)
//!     → unknown name    → literal "unknown"
//! ```

pub mod local;
pub mod operation;

use axum::body::Bytes;
use axum::http::HeaderMap;

use crate::error::ServiceError;
use crate::upstream::UpstreamClient;

pub use local::Value;
pub use operation::{Operation, Route};

/// Body returned for operation names the calculator does not know.
pub const UNKNOWN: &str = "unknown";

/// What a calculator request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Computed(Value),
    /// Raw upstream body, untouched.
    Relayed(Bytes),
    Unknown,
}

/// Metric label for a request path: the operation name, `"unknown"` for
/// unsupported names, `"none"` for an empty path.
pub fn operation_label(segments: &[&str]) -> &'static str {
    match segments.first() {
        Some(name) => Operation::lookup(name).map_or(UNKNOWN, Operation::name),
        None => "none",
    }
}

/// Evaluate `/<op>/<operands...>`.
///
/// `headers` are the inbound request headers; they are forwarded as-is
/// when the operation is served upstream.
pub async fn evaluate(
    upstream: &UpstreamClient,
    segments: &[&str],
    headers: &HeaderMap,
) -> Result<Outcome, ServiceError> {
    let Some((name, operands)) = segments.split_first() else {
        return Err(ServiceError::MissingOperation);
    };

    let Some(op) = Operation::lookup(name) else {
        tracing::debug!(operation = %name, "Unknown operation");
        return Ok(Outcome::Unknown);
    };

    match op.route() {
        Route::Upstream => {
            let body = upstream.forward(op.name(), operands, headers).await?;
            Ok(Outcome::Relayed(body))
        }
        Route::Local(handler) => handler(operands).map(Outcome::Computed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    fn unreachable_upstream() -> UpstreamClient {
        // Port 9 (discard) on loopback; local operations never touch it.
        UpstreamClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_local_operations() {
        let upstream = unreachable_upstream();
        let headers = HeaderMap::new();

        let outcome = evaluate(&upstream, &["sub", "10", "3"], &headers).await.unwrap();
        assert_eq!(outcome, Outcome::Computed(Value::Integer(7)));

        let outcome = evaluate(&upstream, &["div", "10", "4"], &headers).await.unwrap();
        assert_eq!(outcome, Outcome::Computed(Value::Float(2.5)));
    }

    #[tokio::test]
    async fn test_unknown_and_missing() {
        let upstream = unreachable_upstream();
        let headers = HeaderMap::new();

        let outcome = evaluate(&upstream, &["foo", "1", "2"], &headers).await.unwrap();
        assert_eq!(outcome, Outcome::Unknown);

        let err = evaluate(&upstream, &[], &headers).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingOperation));
    }

    #[test]
    fn test_operation_label() {
        assert_eq!(operation_label(&["add", "1"]), "add");
        assert_eq!(operation_label(&["pow", "2"]), "unknown");
        assert_eq!(operation_label(&[]), "none");
    }
}
