//! CLI command handlers.
//!
//! Offline commands run against the canonical graph and print to stdout.

use anyhow::{Context, Result};
use karate_core::layout::compute_layout;
use karate_core::metrics::compute_metrics;
use karate_core::{CentralityMeasure, GraphStore};
use karate_web::KarateConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::Commands;

/// Execute a CLI command.
pub async fn execute_command(command: Commands, mut config: KarateConfig) -> Result<()> {
    apply_overrides(&command, &mut config)?;
    match command {
        Commands::Serve { .. } => cmd_serve(config).await,
        Commands::Metrics { pretty } => cmd_metrics(&config, pretty),
        Commands::Centrality { measure, .. } => cmd_centrality(&config, &measure),
        Commands::Adjacency => cmd_adjacency(),
        Commands::Layout { .. } => cmd_layout(&config),
    }
}

/// Fold command-line flags into the configuration, then validate the result.
fn apply_overrides(command: &Commands, config: &mut KarateConfig) -> Result<()> {
    match command {
        Commands::Serve { bind: Some(bind) } => config.server.bind_address.clone_from(bind),
        Commands::Centrality { top: Some(top), .. } => config.metrics.top_k = *top,
        Commands::Layout { seed: Some(seed) } => config.layout.seed = *seed,
        _ => {}
    }
    config.validate().context("Invalid configuration")?;
    Ok(())
}

async fn cmd_serve(config: KarateConfig) -> Result<()> {
    info!("Starting Karate Club API on {}", config.server.bind_address);
    karate_web::server::run_server(config)
        .await
        .context("Server failed")
}

fn cmd_metrics(config: &KarateConfig, pretty: bool) -> Result<()> {
    let snapshot = GraphStore::karate_club().snapshot();
    let report = compute_metrics(&snapshot, &config.metrics);
    print_json(&report, pretty)
}

fn cmd_centrality(config: &KarateConfig, measure: &str) -> Result<()> {
    let measure: CentralityMeasure = measure.parse()?;
    let snapshot = GraphStore::karate_club().snapshot();
    let top = measure
        .top_nodes(&snapshot, &config.metrics)
        .with_context(|| format!("Failed to compute {measure} centrality"))?;

    println!("Top {} nodes by {} centrality:", top.len(), measure);
    for (rank, node) in top.iter().enumerate() {
        println!("{:>3}. node {:>3}  {:.6}", rank + 1, node.node, node.score);
    }
    Ok(())
}

fn cmd_adjacency() -> Result<()> {
    let matrix = GraphStore::karate_club().snapshot().adjacency_matrix();
    for row in &matrix.matrix {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn cmd_layout(config: &KarateConfig) -> Result<()> {
    let snapshot = GraphStore::karate_club().snapshot();
    let layout = compute_layout(&snapshot, &config.layout);
    print_json(&layout, true)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
