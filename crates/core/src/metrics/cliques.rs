//! Maximal clique enumeration.
//!
//! Enumeration is exponential in the worst case; callers with large graphs
//! should bound it themselves.

use std::collections::BTreeMap;

use petgraph::algo;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphSnapshot, NodeId};

/// Summary of the maximal cliques of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueSummary {
    pub count: usize,
    /// First largest clique in position order, ids ascending
    pub max_clique: Vec<NodeId>,
    pub max_clique_size: usize,
    /// Clique size -> number of maximal cliques of that size
    pub size_distribution: BTreeMap<usize, usize>,
}

/// Every maximal clique as sorted dense positions, cliques in lexicographic order.
///
/// Isolated nodes are maximal cliques of size one.
#[must_use]
pub fn maximal_cliques(snapshot: &GraphSnapshot) -> Vec<Vec<usize>> {
    let mut cliques: Vec<Vec<usize>> = algo::maximal_cliques(snapshot.graph())
        .into_iter()
        // the empty graph yields a single empty set
        .filter(|clique| !clique.is_empty())
        .map(|clique| {
            let mut positions: Vec<usize> = clique.into_iter().map(NodeIndex::index).collect();
            positions.sort_unstable();
            positions
        })
        .collect();
    cliques.sort_unstable();
    cliques
}

#[must_use]
pub fn clique_summary(snapshot: &GraphSnapshot) -> CliqueSummary {
    let cliques = maximal_cliques(snapshot);

    let mut size_distribution = BTreeMap::new();
    let mut largest: &[usize] = &[];
    for clique in &cliques {
        *size_distribution.entry(clique.len()).or_insert(0) += 1;
        if clique.len() > largest.len() {
            largest = clique.as_slice();
        }
    }

    let mut max_clique: Vec<NodeId> = largest
        .iter()
        .filter_map(|&pos| snapshot.node_id(pos))
        .collect();
    max_clique.sort_unstable();

    CliqueSummary {
        count: cliques.len(),
        max_clique_size: max_clique.len(),
        max_clique,
        size_distribution,
    }
}
