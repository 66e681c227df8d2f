//! HTTP client for the upstream collaborator.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Upper bound on a relayed body. Upstream answers are a single number.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Forwards calculator operations to `<base_url>/v2/<op>/...`.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    base: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base = config.base_url.trim_end_matches('/').to_string();
        base.parse::<Uri>()
            .map_err(|e| UpstreamError::InvalidUri(format!("{base}: {e}")))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            base,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// URI for an operation: `<base>/v2/<op>/<operands joined by '/'>`.
    ///
    /// Operands are passed through as they appeared in the inbound path.
    pub fn target_uri(&self, op: &str, operands: &[&str]) -> Result<Uri, UpstreamError> {
        let raw = format!("{}/v2/{}/{}", self.base, op, operands.join("/"));
        raw.parse::<Uri>()
            .map_err(|e| UpstreamError::InvalidUri(format!("{raw}: {e}")))
    }

    /// Send one GET carrying the inbound headers and return the full body.
    pub async fn forward(
        &self,
        op: &str,
        operands: &[&str],
        headers: &HeaderMap,
    ) -> Result<Bytes, UpstreamError> {
        let uri = self.target_uri(op, operands)?;
        tracing::debug!(uri = %uri, "Forwarding to upstream");

        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(outbound) = builder.headers_mut() {
            for (name, value) in headers {
                // The outbound request has no body.
                if name == header::CONTENT_LENGTH || name == header::TRANSFER_ENCODING {
                    continue;
                }
                outbound.append(name.clone(), value.clone());
            }
        }
        let request = builder
            .body(Body::empty())
            .map_err(|e| UpstreamError::InvalidUri(e.to_string()))?;

        let result = match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        };

        match &result {
            Ok(body) => {
                tracing::debug!(op, bytes = body.len(), "Upstream answered");
                metrics::record_upstream(op, "ok");
            }
            Err(e) => {
                tracing::error!(op, error = %e, "Upstream error");
                metrics::record_upstream(op, e.kind());
            }
        }
        result
    }

    async fn exchange(&self, request: Request<Body>) -> Result<Bytes, UpstreamError> {
        let response: hyper::Response<hyper::body::Incoming> =
            self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        axum::body::to_bytes(Body::new(response.into_body()), MAX_BODY_BYTES)
            .await
            .map_err(UpstreamError::Body)
    }
}
