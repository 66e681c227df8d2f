//! Startup orchestration.
//!
//! Config first (file, then command-line overrides, then validation),
//! then the optional metrics exporter, then the listener. Any startup
//! error is fatal.

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{loader, validate_config, ConfigError, ServiceConfig};
use crate::http::{HttpServer, ServiceKind};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Error raised before the server starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut ServiceConfig) {
        if let Some(bind) = self.bind_address {
            config.listener.bind_address = bind;
        }
        if let Some(url) = self.upstream_url {
            config.upstream.base_url = url;
        }
    }
}

/// Read the config file (if any), apply overrides, then validate.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => loader::read_config(path)?,
        None => ServiceConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bind, serve and block until a termination signal has drained the server.
pub async fn launch(kind: ServiceKind, config: ServiceConfig) -> Result<(), StartupError> {
    tracing::info!(
        service = kind.name(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(kind, config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
