//! Order, size, density and the degree distribution.

use serde::{Deserialize, Serialize};

use crate::graph::GraphSnapshot;

/// Label reported for every graph held by the store.
pub const GRAPH_KIND: &str = "undirected, unweighted";

/// Order, size and density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub order: usize,
    pub size: usize,
    pub density: f64,
    pub graph_kind: String,
}

/// Summary of the degree sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeDistribution {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std: f64,
}

#[must_use]
pub fn basic_stats(snapshot: &GraphSnapshot) -> BasicStats {
    let order = snapshot.node_count();
    let size = snapshot.edge_count();
    BasicStats {
        order,
        size,
        density: density(order, size),
        graph_kind: GRAPH_KIND.to_string(),
    }
}

/// `2m / (n(n-1))`, or 0 for fewer than two nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(order: usize, size: usize) -> f64 {
    if order < 2 {
        return 0.0;
    }
    let n = order as f64;
    2.0 * size as f64 / (n * (n - 1.0))
}

/// Degree statistics; every field is 0 for an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_distribution(snapshot: &GraphSnapshot) -> DegreeDistribution {
    let mut degrees = snapshot.degrees();
    if degrees.is_empty() {
        return DegreeDistribution {
            min: 0,
            max: 0,
            mean: 0.0,
            median: 0.0,
            std: 0.0,
        };
    }
    degrees.sort_unstable();

    let count = degrees.len() as f64;
    let mean = degrees.iter().sum::<usize>() as f64 / count;
    let variance = degrees
        .iter()
        .map(|&d| (d as f64 - mean).powi(2))
        .sum::<f64>()
        / count;

    let mid = degrees.len() / 2;
    let median = if degrees.len() % 2 == 0 {
        (degrees[mid - 1] + degrees[mid]) as f64 / 2.0
    } else {
        degrees[mid] as f64
    };

    DegreeDistribution {
        min: degrees.first().copied().unwrap_or_default(),
        max: degrees.last().copied().unwrap_or_default(),
        mean,
        median,
        std: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_density_bounds() {
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(1, 0), 0.0);
        assert_eq!(density(2, 1), 1.0);
        assert_eq!(density(4, 6), 1.0);
    }

    #[test]
    fn test_karate_basic_stats() {
        let stats = basic_stats(&GraphStore::karate_club().snapshot());
        assert_eq!(stats.order, 34);
        assert_eq!(stats.size, 78);
        assert!((stats.density - 0.139_037_433_155_080_2).abs() < 1e-12);
        assert_eq!(stats.graph_kind, GRAPH_KIND);
    }

    #[test]
    fn test_karate_degree_distribution() {
        let dist = degree_distribution(&GraphStore::karate_club().snapshot());
        assert_eq!(dist.min, 1);
        assert_eq!(dist.max, 17);
        assert!((dist.mean - 4.588_235_294_117_647).abs() < 1e-12);
        assert!((dist.median - 3.0).abs() < f64::EPSILON);
        assert!((dist.std - 3.820_360_677_912_828).abs() < 1e-9);
    }

    #[test]
    fn test_even_count_median_averages_middle_pair() {
        // degrees: 1, 2, 2, 1 -> sorted 1 1 2 2 -> median 1.5
        let store = GraphStore::from_edges([1, 2, 3, 4], [(1, 2), (2, 3), (3, 4)]).unwrap();
        let dist = degree_distribution(&store.snapshot());
        assert!((dist.median - 1.5).abs() < f64::EPSILON);
        assert!((dist.std - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_graph_is_all_zero() {
        let dist = degree_distribution(&GraphStore::new().snapshot());
        assert_eq!(dist.min, 0);
        assert_eq!(dist.max, 0);
        assert_eq!(dist.mean, 0.0);
        assert_eq!(dist.median, 0.0);
        assert_eq!(dist.std, 0.0);
    }
}
