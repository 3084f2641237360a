//! Market calendar dashboard core - entry point.
//!
//! Seeds a month of history per symbol, keeps it live over push
//! streams, and periodically reports calendar classification and
//! indicator summaries.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Market calendar data engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via MCAL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    mcal_feed::init_crypto();

    let args = Args::parse();

    mcal_app::init_logging()?;

    info!("Starting mcal v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .or_else(|| std::env::var("MCAL_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = mcal_app::AppConfig::load(&config_path)?;
    info!(symbols = ?config.symbols, "Configuration loaded");

    let mut app = mcal_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
