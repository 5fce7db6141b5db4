//! Frequent small motifs: triangles, open 3-node paths and local stars.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphSnapshot, NodeId};

/// Motif counts for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motifs {
    /// Number of 3-cliques
    pub triangles: usize,
    /// Paths `a - c - b` with `a` and `b` not adjacent, counted once per centre `c`
    pub open_triads: usize,
    /// `open_triads / 2`, the figure historically reported as "3-paths"
    pub paths_3: usize,
    /// Nodes of degree >= 3 that sit in no triangle
    pub local_stars: Vec<NodeId>,
    pub local_star_count: usize,
}

/// Sum of per-node triangle counts divided by three.
#[must_use]
pub fn total_triangles(triangles: &[usize]) -> usize {
    triangles.iter().sum::<usize>() / 3
}

/// Unordered neighbour pairs with no edge between them, summed over centres.
#[must_use]
pub fn open_triads(snapshot: &GraphSnapshot) -> usize {
    (0..snapshot.node_count())
        .map(|c| {
            snapshot
                .neighbors(c)
                .iter()
                .tuple_combinations()
                .filter(|&(&a, &b)| !snapshot.has_edge(a, b))
                .count()
        })
        .sum()
}

/// Ids of nodes with degree >= 3 and no incident triangle, in iteration order.
#[must_use]
pub fn local_stars(snapshot: &GraphSnapshot, triangles: &[usize]) -> Vec<NodeId> {
    triangles
        .iter()
        .enumerate()
        .filter(|&(u, &t)| t == 0 && snapshot.degree(u) >= 3)
        .filter_map(|(u, _)| snapshot.node_id(u))
        .collect()
}

#[must_use]
pub fn motifs(snapshot: &GraphSnapshot, triangles: &[usize]) -> Motifs {
    let open = open_triads(snapshot);
    let stars = local_stars(snapshot, triangles);
    Motifs {
        triangles: total_triangles(triangles),
        open_triads: open,
        paths_3: open / 2,
        local_star_count: stars.len(),
        local_stars: stars,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::graph::GraphStore;
    use crate::metrics::clustering::triangles_per_node;

    fn motifs_of(store: &GraphStore) -> Motifs {
        let snapshot = store.snapshot();
        let triangles = triangles_per_node(&snapshot);
        motifs(&snapshot, &triangles)
    }

    #[test]
    fn test_karate_motifs() {
        let found = motifs_of(&GraphStore::karate_club());
        assert_eq!(found.triangles, 45);
        assert_eq!(found.open_triads, 393);
        assert_eq!(found.paths_3, 196);
        assert!(found.local_stars.is_empty());
        assert_eq!(found.local_star_count, 0);
    }

    #[test]
    fn test_star_is_a_local_star() {
        let store = GraphStore::from_edges([0, 1, 2, 3], [(0, 1), (0, 2), (0, 3)]).unwrap();
        let found = motifs_of(&store);
        assert_eq!(found.triangles, 0);
        assert_eq!(found.open_triads, 3);
        assert_eq!(found.paths_3, 1);
        assert_eq!(found.local_stars, vec![0]);
    }

    #[test]
    fn test_closing_a_star_removes_it() {
        let store =
            GraphStore::from_edges([0, 1, 2, 3], [(0, 1), (0, 2), (0, 3), (1, 2)]).unwrap();
        let found = motifs_of(&store);
        assert_eq!(found.triangles, 1);
        assert!(found.local_stars.is_empty());
    }

    #[test]
    fn test_single_path_halves_to_zero() {
        let store = GraphStore::from_edges([0, 1, 2], [(0, 1), (1, 2)]).unwrap();
        let found = motifs_of(&store);
        assert_eq!(found.open_triads, 1);
        assert_eq!(found.paths_3, 0);
    }
}
