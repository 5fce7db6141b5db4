//! # karate
//!
//! Command-line entry point: the HTTP API (`serve`) and offline commands on
//! the canonical Karate Club graph.
//!
//! Configuration is layered: defaults, then the `--config` TOML file, then
//! `KARATE_*` environment variables, then command flags.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use karate_web::KarateConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = KarateConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    commands::execute_command(cli.command, config).await
}

/// Initialize tracing; logs go to stderr so JSON output stays clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,karate_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
