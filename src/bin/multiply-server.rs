//! Multiply service: product of the integer segments of the request path.

use std::path::PathBuf;

use calc_mesh::lifecycle::{self, Overrides};
use calc_mesh::observability::logging;
use calc_mesh::ServiceKind;
use clap::Parser;

#[derive(Parser)]
#[command(name = "multiply-server")]
#[command(about = "Returns the product of the integer path segments", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = lifecycle::resolve_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            ..Default::default()
        },
    )?;

    logging::init(&config.observability);
    tracing::info!("multiply-server v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::launch(ServiceKind::Multiply, config).await?;
    Ok(())
}
