//! Dailybook command-line client.
//!
//! Loads configuration, wires the production adapters and runs one
//! command. The session persists in a file between invocations.

mod cli;

use clap::Parser;
use dailybook_infrastructure::{ClientConfig, build_client};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;
    tracing::debug!(origin = %config.origin, base = %config.api_base_url, "configuration loaded");

    let client = build_client(&config)?;
    let result = cli::run(&client, cli.command).await;
    if let Some(hint) = result.as_ref().err().and_then(|err| cli::hint(&**err)) {
        eprintln!("{hint}");
    }
    result
}
