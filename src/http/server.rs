//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for the calculator or the multiply service
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Render outcomes and errors, record request metrics
//! - Serve on a listener until shutdown is signalled

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::calculator::{self, Outcome, UNKNOWN};
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::http::request::{self, path_segments, request_id_header, UuidRequestId};
use crate::http::response;
use crate::multiply;
use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Which of the two services a server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Calculator,
    Multiply,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Calculator => "calculator",
            ServiceKind::Multiply => "multiply",
        }
    }
}

/// HTTP server for one calc-mesh service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    kind: ServiceKind,
}

impl HttpServer {
    /// Create a server of the given kind.
    pub fn new(kind: ServiceKind, config: ServiceConfig) -> Result<Self, UpstreamError> {
        match kind {
            ServiceKind::Calculator => Self::calculator(config),
            ServiceKind::Multiply => Ok(Self::multiply(config)),
        }
    }

    /// Calculator service, proxying `add`/`mul` to `config.upstream`.
    pub fn calculator(config: ServiceConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        tracing::info!(upstream = %upstream.base_url(), "Calculator upstream configured");

        let routes = Router::new()
            .route("/", get(calculator_handler))
            .route("/{*path}", get(calculator_handler))
            .with_state(upstream);

        Ok(Self::with_routes(ServiceKind::Calculator, routes, config))
    }

    /// Multiply service. Has no outbound dependencies.
    pub fn multiply(config: ServiceConfig) -> Self {
        let routes = Router::new()
            .route("/", get(multiply_handler))
            .route("/{*path}", get(multiply_handler));

        Self::with_routes(ServiceKind::Multiply, routes, config)
    }

    fn with_routes(kind: ServiceKind, routes: Router, config: ServiceConfig) -> Self {
        let router = Self::apply_layers(routes, &config);
        Self {
            router,
            config,
            kind,
        }
    }

    /// Wrap routes with the middleware stack, outermost first.
    ///
    /// A request that outlives `timeouts.request_secs` is answered with
    /// 504, the same status as an expired upstream deadline.
    fn apply_layers(routes: Router, config: &ServiceConfig) -> Router {
        routes.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::GATEWAY_TIMEOUT,
                    Duration::from_secs(config.timeouts.request_secs),
                )),
        )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = self.kind.name(),
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(service = self.kind.name(), "HTTP server stopped");
        Ok(())
    }
}

/// `GET /<op>/<operands...>` on the calculator.
async fn calculator_handler(
    State(upstream): State<UpstreamClient>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let (parts, _body) = request.into_parts();
    let segments = path_segments(parts.uri.path());
    let operation = calculator::operation_label(&segments);

    let result = calculator::evaluate(&upstream, &segments, &parts.headers)
        .await
        .map(|outcome| match outcome {
            Outcome::Computed(value) => response::text_line(value),
            Outcome::Relayed(body) => response::relay(&body),
            Outcome::Unknown => response::text_line(UNKNOWN),
        });

    finish(ServiceKind::Calculator, operation, result, start)
}

/// `GET /<n1>/.../<nk>` on the multiply service.
async fn multiply_handler(uri: Uri) -> Response {
    let start = Instant::now();
    let segments = path_segments(uri.path());
    let result = multiply::product(&segments).map(response::text_line);

    finish(ServiceKind::Multiply, "mul", result, start)
}

fn finish(
    kind: ServiceKind,
    operation: &'static str,
    result: Result<Response, ServiceError>,
    start: Instant,
) -> Response {
    let response = result.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(kind.name(), operation, response.status().as_u16(), start);
    response
}
