//! BCI dashboard probe
//!
//! Runs one GraphQL operation against the dashboard backend and prints the
//! result as JSON. Reads that fail are answered with mock data and flagged
//! with `"demo_mode": true`; writes that fail exit non-zero.
//!
//! Usage:
//!   bci-probe --endpoint http://localhost:9598/graphql memory-stats
//!   bci-probe create-task "Review PR" --priority high

use anyhow::{Context, Result};
use bci_client::{BciClient, NetworkErrorEvent};
use bci_probe::{client_config, execute, Args};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = client_config(&args)?;
    info!("Probing {}", config.endpoint);
    let client = BciClient::new(config).context("building client")?;
    client.subscribe_network_errors(Arc::new(|event: &NetworkErrorEvent| {
        warn!("Backend unreachable during {}: {}", event.operation, event.message);
    }));

    let report = execute(&client, &args.command).await?;
    if report.demo_mode {
        warn!("{} served mock data", report.operation);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
