//! CLI command definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Karate Club graph metrics
#[derive(Parser, Debug)]
#[command(name = "karate")]
#[command(version)]
#[command(about = "Structural metrics and 3D layout for the Zachary Karate Club graph")]
#[command(
    long_about = "Serves the Karate Club graph over HTTP, or computes metrics, centralities, the adjacency matrix and the 3D layout offline on the canonical graph."
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind to, overriding configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Print the full metrics report as JSON
    Metrics {
        /// Pretty-print the JSON
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },

    /// Print the top nodes for one centrality measure
    Centrality {
        /// degree, betweenness, closeness or eigenvector
        measure: String,

        /// Number of nodes to print, overriding configuration
        #[arg(short = 'k', long)]
        top: Option<usize>,
    },

    /// Print the adjacency matrix
    Adjacency,

    /// Print the 3D layout as JSON
    Layout {
        /// Layout seed, overriding configuration
        #[arg(short, long)]
        seed: Option<u64>,
    },
}
