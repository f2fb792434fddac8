//! IOS-XE RESTCONF CLI
//!
//! Reads interfaces and manages loopbacks and static routes on a single
//! Cisco IOS-XE device:
//! - `interfaces`: print interfaces of one type, or the raw tree
//! - `loopback create|update`: POST or PUT a loopback
//! - `routes list|add|delete`: static route management
//!
//! Connection settings come from flags or `IOSXE_*` environment variables.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Cli;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let device = cli.connect().context("failed to configure device client")?;

    info!("Configuration:");
    info!("  RESTCONF root: {}", device.base_url());
    info!("  Username: {}", cli.username);
    info!("  TLS verification: {}", !cli.insecure);

    let mut stdout = std::io::stdout().lock();
    let accepted = commands::run(&cli.command, &device, &mut stdout).await?;

    Ok(if accepted { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
