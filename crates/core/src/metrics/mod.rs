//! Structural metrics over a [`GraphSnapshot`].
//!
//! [`compute_metrics`] runs every sub-computation and bundles the results in
//! a [`MetricsReport`]. Each sub-computation is also exposed on its own.
//! Statistics that can be undefined or can fail are [`Statistic`] values, so
//! one failing measure never hides the others.

pub mod basic;
pub mod centrality;
pub mod cliques;
pub mod clustering;
pub mod connectivity;
pub mod cores;
pub mod motifs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{GraphSnapshot, NodeId};
use crate::statistic::Statistic;

pub use basic::{BasicStats, DegreeDistribution};
pub use centrality::{CentralityMeasure, CentralityScores, RankedNode, TopCentralities};
pub use cliques::CliqueSummary;
pub use clustering::ClusteringStats;
pub use connectivity::Connectivity;
pub use cores::KCoreSummary;
pub use motifs::Motifs;

/// Tunables for the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Length of every top-centrality list
    pub top_k: usize,
    pub eigenvector_max_iter: usize,
    pub eigenvector_tolerance: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            eigenvector_max_iter: 1000,
            eigenvector_tolerance: 1e-6,
        }
    }
}

/// Every statistic computed for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub basic: BasicStats,
    pub degree_distribution: DegreeDistribution,
    pub clustering: ClusteringStats,
    pub motifs: Motifs,
    pub cliques: CliqueSummary,
    pub k_cores: KCoreSummary,
    pub top_centralities: TopCentralities,
    pub connectivity: Connectivity,
    pub assortativity: Statistic<f64>,
}

/// Per-node view of the metrics, keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProfile {
    pub id: NodeId,
    pub degree: usize,
    pub clustering: f64,
    pub triangles: usize,
    pub k_core: usize,
    pub centrality: NodeCentrality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCentrality {
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    pub eigenvector: Statistic<f64>,
}

/// Compute the full report.
///
/// Never fails: statistics that cannot be computed are reported as
/// `NotApplicable` or `Unavailable`.
#[must_use]
pub fn compute_metrics(snapshot: &GraphSnapshot, config: &MetricsConfig) -> MetricsReport {
    debug!(
        "Computing metrics for {} nodes, {} edges",
        snapshot.node_count(),
        snapshot.edge_count()
    );

    let triangles = clustering::triangles_per_node(snapshot);
    let cores = cores::core_numbers(snapshot);
    let scores = CentralityScores::compute(snapshot, config);

    MetricsReport {
        basic: basic::basic_stats(snapshot),
        degree_distribution: basic::degree_distribution(snapshot),
        clustering: clustering::clustering_stats(snapshot, &triangles),
        motifs: motifs::motifs(snapshot, &triangles),
        cliques: cliques::clique_summary(snapshot),
        k_cores: cores::k_core_summary(&cores),
        top_centralities: scores.top(snapshot, config.top_k),
        connectivity: connectivity::connectivity(snapshot),
        assortativity: connectivity::degree_assortativity(snapshot),
    }
}

/// Profile of every node, in iteration order.
#[must_use]
pub fn node_profiles(snapshot: &GraphSnapshot, config: &MetricsConfig) -> Vec<NodeProfile> {
    let triangles = clustering::triangles_per_node(snapshot);
    let local = clustering::local_clustering(snapshot, &triangles);
    let cores = cores::core_numbers(snapshot);
    let scores = CentralityScores::compute(snapshot, config);
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };

    snapshot
        .node_ids()
        .enumerate()
        .map(|(pos, id)| NodeProfile {
            id,
            degree: snapshot.degree(pos),
            clustering: finite(local[pos]),
            triangles: triangles[pos],
            k_core: cores[pos],
            centrality: NodeCentrality {
                degree: finite(scores.degree[pos]),
                betweenness: finite(scores.betweenness[pos]),
                closeness: finite(scores.closeness[pos]),
                eigenvector: match &scores.eigenvector {
                    Statistic::Available(values) => Statistic::finite(values[pos]),
                    Statistic::NotApplicable => Statistic::NotApplicable,
                    Statistic::Unavailable(reason) => Statistic::Unavailable(reason.clone()),
                },
            },
        })
        .collect()
}
