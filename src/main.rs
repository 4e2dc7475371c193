use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod config;

use cli::Cli;
use config::AppConfig;

/// Main entry point for the Centime CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "centime=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    info!("centime starting up (database: {})", config.database_url);

    let cli = Cli::parse();
    cli.run(&config).await
}
