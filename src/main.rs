//! Calculator service.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────┐
//!                  │             calculator-server            │
//!   GET /op/a/b    │  ┌────────┐   ┌────────────┐             │
//!  ────────────────┼─▶│  http  │──▶│ calculator │─┐ sub, div  │
//!                  │  │ server │   │  dispatch  │ │ (local)   │
//!                  │  └────────┘   └─────┬──────┘◀┘           │
//!   "<result>\n"   │       ▲             │ add, mul           │
//!  ◀───────────────┼───────┘             ▼                    │
//!                  │               ┌──────────┐               │      upstream
//!                  │               │ upstream │───────────────┼────▶ /v2/<op>/...
//!                  │               │  client  │◀──────────────┼────  raw body
//!                  │               └──────────┘               │
//!                  └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use calc_mesh::lifecycle::{self, Overrides};
use calc_mesh::observability::logging;
use calc_mesh::ServiceKind;
use clap::Parser;

#[derive(Parser)]
#[command(name = "calculator-server")]
#[command(about = "Calculator front-end: sub/div locally, add/mul via the upstream", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream base URL, overrides `upstream.base_url`.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = lifecycle::resolve_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            upstream_url: cli.upstream,
        },
    )?;

    logging::init(&config.observability);
    tracing::info!("calculator-server v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::launch(ServiceKind::Calculator, config).await?;
    Ok(())
}
