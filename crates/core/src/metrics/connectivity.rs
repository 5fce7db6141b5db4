//! Components, eccentricity-based statistics and degree assortativity.

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};

use crate::graph::GraphSnapshot;
use crate::statistic::Statistic;

/// Path-length statistics; only defined on a non-empty connected graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connectivity {
    pub components: usize,
    pub is_connected: bool,
    pub diameter: Statistic<usize>,
    pub radius: Statistic<usize>,
    pub avg_shortest_path: Statistic<f64>,
}

/// Hop distance from `source` to every node; `None` when unreachable.
#[must_use]
pub fn bfs_distances(snapshot: &GraphSnapshot, source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; snapshot.node_count()];
    if source >= dist.len() {
        return dist;
    }
    dist[source] = Some(0);
    let mut queue = VecDeque::from([(source, 0_usize)]);
    while let Some((v, d)) = queue.pop_front() {
        for &w in snapshot.neighbors(v) {
            if dist[w].is_none() {
                dist[w] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }
    dist
}

/// Number of connected components; 0 for the empty graph.
#[must_use]
pub fn component_count(snapshot: &GraphSnapshot) -> usize {
    connected_components(snapshot.graph())
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn connectivity(snapshot: &GraphSnapshot) -> Connectivity {
    let n = snapshot.node_count();
    let components = component_count(snapshot);
    let is_connected = n > 0 && components == 1;

    if !is_connected {
        return Connectivity {
            components,
            is_connected,
            diameter: Statistic::NotApplicable,
            radius: Statistic::NotApplicable,
            avg_shortest_path: Statistic::NotApplicable,
        };
    }

    let mut eccentricities = Vec::with_capacity(n);
    let mut total_distance = 0_usize;
    for source in 0..n {
        let distances = bfs_distances(snapshot, source);
        let (eccentricity, sum) = distances
            .iter()
            .flatten()
            .fold((0_usize, 0_usize), |(max, sum), &d| (max.max(d), sum + d));
        eccentricities.push(eccentricity);
        total_distance += sum;
    }

    let avg_shortest_path = if n > 1 {
        Statistic::finite(total_distance as f64 / (n * (n - 1)) as f64)
    } else {
        Statistic::Available(0.0)
    };

    Connectivity {
        components,
        is_connected,
        diameter: eccentricities.iter().max().copied().into(),
        radius: eccentricities.iter().min().copied().into(),
        avg_shortest_path,
    }
}

/// Pearson correlation of degrees at either end of every edge, each edge
/// counted in both orientations.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_assortativity(snapshot: &GraphSnapshot) -> Statistic<f64> {
    let degrees = snapshot.degrees();
    let pairs: Vec<(f64, f64)> = snapshot
        .edges()
        .flat_map(|(u, v)| {
            let (du, dv) = (degrees[u] as f64, degrees[v] as f64);
            [(du, dv), (dv, du)]
        })
        .collect();

    if pairs.is_empty() {
        return Statistic::NotApplicable;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|&(x, _)| x).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|&(_, y)| y).sum::<f64>() / count;
    let (cov, var_x, var_y) = pairs.iter().fold((0.0, 0.0, 0.0), |(c, vx, vy), &(x, y)| {
        let (dx, dy) = (x - mean_x, y - mean_y);
        (c + dx * dy, vx + dx * dx, vy + dy * dy)
    });

    let denominator = (var_x * var_y).sqrt();
    if denominator <= f64::EPSILON {
        return Statistic::NotApplicable;
    }
    Statistic::finite(cov / denominator)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_karate_connectivity() {
        let snapshot = GraphStore::karate_club().snapshot();
        let result = connectivity(&snapshot);
        assert_eq!(result.components, 1);
        assert!(result.is_connected);
        assert_eq!(result.diameter, Statistic::Available(5));
        assert_eq!(result.radius, Statistic::Available(3));
        let avg = result.avg_shortest_path.into_option().unwrap();
        assert!((avg - 2.408_199_643_493_761).abs() < 1e-9);
    }

    #[test]
    fn test_karate_assortativity() {
        let snapshot = GraphStore::karate_club().snapshot();
        let r = degree_assortativity(&snapshot).into_option().unwrap();
        assert!((r - (-0.475_613_097_684_614_74)).abs() < 1e-9);
    }

    #[test]
    fn test_disconnected_graph_has_no_path_statistics() {
        let mut store = GraphStore::karate_club();
        store.add_node(100).unwrap();
        let result = connectivity(&store.snapshot());
        assert_eq!(result.components, 2);
        assert!(!result.is_connected);
        assert_eq!(result.diameter, Statistic::NotApplicable);
        assert_eq!(result.radius, Statistic::NotApplicable);
        assert_eq!(result.avg_shortest_path, Statistic::NotApplicable);
    }

    #[test]
    fn test_empty_graph() {
        let snapshot = GraphStore::new().snapshot();
        let result = connectivity(&snapshot);
        assert_eq!(result.components, 0);
        assert!(!result.is_connected);
        assert_eq!(result.diameter, Statistic::NotApplicable);
        assert_eq!(degree_assortativity(&snapshot), Statistic::NotApplicable);
    }

    #[test]
    fn test_single_node_is_connected() {
        let snapshot = GraphStore::from_edges([5], []).unwrap().snapshot();
        let result = connectivity(&snapshot);
        assert_eq!(result.diameter, Statistic::Available(0));
        assert_eq!(result.avg_shortest_path, Statistic::Available(0.0));
    }

    #[test]
    fn test_regular_graph_assortativity_is_not_applicable() {
        // 4-cycle: every endpoint has degree 2
        let store = GraphStore::from_edges([0, 1, 2, 3], [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(degree_assortativity(&store.snapshot()), Statistic::NotApplicable);
    }

    #[test]
    fn test_bfs_distances_marks_unreachable() {
        let store = GraphStore::from_edges([0, 1, 2], [(0, 1)]).unwrap();
        let distances = bfs_distances(&store.snapshot(), 0);
        assert_eq!(distances, vec![Some(0), Some(1), None]);
    }
}
