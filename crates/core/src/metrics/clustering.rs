//! Triangle counts and clustering coefficients.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::GraphSnapshot;
use crate::statistic::Statistic;

/// Graph-level clustering figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringStats {
    /// Mean of the local coefficients over all nodes
    pub average: Statistic<f64>,
    /// Ratio of closed triplets to all connected triplets
    pub transitivity: f64,
}

/// Number of triangles each node belongs to, in iteration order.
#[must_use]
pub fn triangles_per_node(snapshot: &GraphSnapshot) -> Vec<usize> {
    (0..snapshot.node_count())
        .map(|u| {
            snapshot
                .neighbors(u)
                .iter()
                .tuple_combinations()
                .filter(|&(&v, &w)| snapshot.has_edge(v, w))
                .count()
        })
        .collect()
}

/// Local clustering coefficient `2T / (d(d-1))` per node; 0 below degree 2.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn local_clustering(snapshot: &GraphSnapshot, triangles: &[usize]) -> Vec<f64> {
    triangles
        .iter()
        .enumerate()
        .map(|(u, &t)| {
            let d = snapshot.degree(u);
            if d < 2 {
                0.0
            } else {
                2.0 * t as f64 / (d * (d - 1)) as f64
            }
        })
        .collect()
}

/// Mean local clustering; not applicable to an empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(local: &[f64]) -> Statistic<f64> {
    if local.is_empty() {
        return Statistic::NotApplicable;
    }
    Statistic::finite(local.iter().sum::<f64>() / local.len() as f64)
}

/// `3 × triangles / connected triplets`; 0 when the graph has no triangle.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(snapshot: &GraphSnapshot, triangles: &[usize]) -> f64 {
    let closed: usize = triangles.iter().sum();
    if closed == 0 {
        return 0.0;
    }
    let wedges: usize = snapshot
        .degrees()
        .into_iter()
        .map(|d| d * d.saturating_sub(1))
        .sum();
    // each triangle is seen once per corner and each corner contributes two ordered pairs
    2.0 * closed as f64 / wedges as f64
}

#[must_use]
pub fn clustering_stats(snapshot: &GraphSnapshot, triangles: &[usize]) -> ClusteringStats {
    let local = local_clustering(snapshot, triangles);
    ClusteringStats {
        average: average_clustering(&local),
        transitivity: transitivity(snapshot, triangles),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_triangle_per_node_on_diamond() {
        // 1-2-3 and 1-3-4 share the 1-3 chord
        let store =
            GraphStore::from_edges([1, 2, 3, 4], [(1, 2), (2, 3), (1, 3), (3, 4), (1, 4)])
                .unwrap();
        assert_eq!(triangles_per_node(&store.snapshot()), vec![2, 1, 2, 1]);
    }

    #[test]
    fn test_local_clustering_on_diamond() {
        let store =
            GraphStore::from_edges([1, 2, 3, 4], [(1, 2), (2, 3), (1, 3), (3, 4), (1, 4)])
                .unwrap();
        let snapshot = store.snapshot();
        let local = local_clustering(&snapshot, &triangles_per_node(&snapshot));
        assert!((local[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((local[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_karate_clustering() {
        let snapshot = GraphStore::karate_club().snapshot();
        let triangles = triangles_per_node(&snapshot);
        assert_eq!(triangles[0], 18);
        assert_eq!(triangles[33], 15);

        let local = local_clustering(&snapshot, &triangles);
        assert!((local[0] - 0.15).abs() < 1e-12);

        let stats = clustering_stats(&snapshot, &triangles);
        let average = stats.average.into_option().unwrap();
        assert!((average - 0.570_638_478_207_682_3).abs() < 1e-9);
        assert!((stats.transitivity - 0.255_681_818_181_818_2).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_free_graph_has_zero_transitivity() {
        let store = GraphStore::from_edges([1, 2, 3], [(1, 2), (2, 3)]).unwrap();
        let snapshot = store.snapshot();
        let triangles = triangles_per_node(&snapshot);
        assert_eq!(transitivity(&snapshot, &triangles), 0.0);
    }

    #[test]
    fn test_empty_graph_average_not_applicable() {
        assert_eq!(average_clustering(&[]), Statistic::NotApplicable);
    }
}
