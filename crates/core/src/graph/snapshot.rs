//! Immutable, compact view of the graph used by the layout and metrics engines.
//!
//! Nodes are re-indexed densely `0..n` following the store's insertion
//! order, so algorithms can use plain vectors indexed by position.

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use super::NodeId;

/// Frozen copy of a [`GraphStore`](super::GraphStore).
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    /// Compact petgraph copy; node `i` carries the id at position `i`
    graph: UnGraph<NodeId, ()>,
    /// Sorted neighbour positions per node
    adjacency: Vec<Vec<usize>>,
}

/// Dense 0/1 adjacency matrix, rows and columns ordered by sorted node id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    pub nodes: Vec<NodeId>,
    pub matrix: Vec<Vec<u8>>,
}

impl GraphSnapshot {
    pub(super) fn from_adjacency(order: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let adjacency: Vec<Vec<usize>> = adjacency
            .into_iter()
            .map(|neighbors| neighbors.into_iter().sorted_unstable().dedup().collect())
            .collect();

        let mut graph = UnGraph::with_capacity(order.len(), 0);
        for id in order {
            graph.add_node(id);
        }
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors.iter().filter(|&&v| v > u) {
                graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }

        Self { graph, adjacency }
    }

    /// The compact petgraph representation.
    #[must_use]
    pub const fn graph(&self) -> &UnGraph<NodeId, ()> {
        &self.graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Id of the node at dense position `pos`.
    #[must_use]
    pub fn node_id(&self, pos: usize) -> Option<NodeId> {
        self.graph.node_weight(NodeIndex::new(pos)).copied()
    }

    /// Node ids in iteration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().copied()
    }

    /// Sorted neighbour positions of the node at `pos`.
    #[must_use]
    pub fn neighbors(&self, pos: usize) -> &[usize] {
        self.adjacency.get(pos).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn degree(&self, pos: usize) -> usize {
        self.neighbors(pos).len()
    }

    /// Degree of every node, in iteration order.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Edges as dense position pairs `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| v > u)
                .map(move |v| (u, v))
        })
    }

    /// Edges as node id pairs, in [`edges`](Self::edges) order.
    #[must_use]
    pub fn edge_ids(&self) -> Vec<(NodeId, NodeId)> {
        self.edges()
            .filter_map(|(u, v)| Some((self.node_id(u)?, self.node_id(v)?)))
            .collect()
    }

    /// Symmetric 0/1 adjacency matrix with a zero diagonal.
    #[must_use]
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let by_id: Vec<(NodeId, usize)> = self
            .node_ids()
            .enumerate()
            .map(|(pos, id)| (id, pos))
            .sorted_unstable()
            .collect();

        let matrix = by_id
            .iter()
            .map(|&(_, row)| {
                by_id
                    .iter()
                    .map(|&(_, col)| u8::from(self.has_edge(row, col)))
                    .collect()
            })
            .collect();

        AdjacencyMatrix {
            nodes: by_id.into_iter().map(|(id, _)| id).collect(),
            matrix,
        }
    }
}
