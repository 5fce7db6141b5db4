//! # Graph Store
//!
//! Mutable undirected, unweighted graph using petgraph.
//!
//! Nodes are identified by integer [`NodeId`]s and iterate in insertion
//! order; a node that is removed and added again moves to the end. Edges
//! are unordered pairs of distinct nodes with no parallel edges.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use std::collections::HashMap;
use tracing::debug;

use crate::error::GraphError;
use crate::result::Result;

mod dataset;
mod snapshot;

pub use dataset::{KARATE_EDGES, KARATE_NODE_COUNT};
pub use snapshot::{AdjacencyMatrix, GraphSnapshot};

/// Type alias for a node identifier
pub type NodeId = u32;

/// Undirected graph store wrapping petgraph's `StableUnGraph`.
///
/// `StableUnGraph` keeps node indices valid across removals, so `node_map`
/// never needs to be rebuilt.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// The underlying undirected graph
    graph: StableUnGraph<NodeId, ()>,
    /// Map from NodeId to NodeIndex for O(1) lookups
    node_map: HashMap<NodeId, NodeIndex>,
    /// Node ids in insertion order
    order: Vec<NodeId>,
}

impl GraphStore {
    /// Create a new empty store
    ///
    /// # Examples
    ///
    /// ```
    /// use karate_core::GraphStore;
    ///
    /// let store = GraphStore::new();
    /// assert_eq!(store.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the canonical Karate Club topology.
    ///
    /// # Examples
    ///
    /// ```
    /// use karate_core::GraphStore;
    ///
    /// let store = GraphStore::karate_club();
    /// assert_eq!(store.node_count(), 34);
    /// assert_eq!(store.edge_count(), 78);
    /// ```
    #[must_use]
    pub fn karate_club() -> Self {
        let mut store = Self::new();
        for id in 0..KARATE_NODE_COUNT {
            store.insert_node(id);
        }
        for &(u, v) in &KARATE_EDGES {
            store.insert_edge(u, v);
        }
        store
    }

    /// Build a store from explicit node and edge lists.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate node, duplicate edge, self-loop or edge
    /// referencing an absent node.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self> {
        let mut store = Self::new();
        for id in nodes {
            store.add_node(id)?;
        }
        for (u, v) in edges {
            store.add_edge(u, v)?;
        }
        Ok(store)
    }

    /// Add an isolated node
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicateNode` if the id is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use karate_core::GraphStore;
    ///
    /// let mut store = GraphStore::new();
    /// assert!(store.add_node(1).is_ok());
    /// assert!(store.add_node(1).is_err());
    /// ```
    pub fn add_node(&mut self, id: NodeId) -> Result<()> {
        if self.node_map.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.insert_node(id);
        debug!("Added node {}", id);
        Ok(())
    }

    /// Remove a node and every edge incident to it
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeNotFound` if the id is absent.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let index = self
            .node_map
            .remove(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        // StableGraph drops incident edges together with the node
        self.graph.remove_node(index);
        self.order.retain(|&n| n != id);
        debug!("Removed node {}", id);
        Ok(())
    }

    /// Add an undirected edge between two existing nodes
    ///
    /// # Errors
    ///
    /// * `GraphError::SelfLoop` if `source == target`
    /// * `GraphError::NodeNotFound` if either endpoint is absent
    /// * `GraphError::DuplicateEdge` if the edge already exists
    ///
    /// # Examples
    ///
    /// ```
    /// use karate_core::{GraphError, GraphStore};
    ///
    /// let mut store = GraphStore::new();
    /// store.add_node(1).unwrap();
    /// store.add_node(2).unwrap();
    /// assert!(store.add_edge(1, 2).is_ok());
    /// assert_eq!(store.add_edge(2, 1), Err(GraphError::DuplicateEdge(2, 1)));
    /// ```
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        if self.graph.find_edge(from, to).is_some() {
            return Err(GraphError::duplicate_edge(source, target));
        }
        self.graph.add_edge(from, to, ());
        debug!("Added edge {} -- {}", source, target);
        Ok(())
    }

    /// Remove the edge between two nodes
    ///
    /// # Errors
    ///
    /// Returns `GraphError::EdgeNotFound` if there is no such edge (including
    /// when either endpoint is absent).
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        let edge = self
            .node_map
            .get(&source)
            .zip(self.node_map.get(&target))
            .and_then(|(&from, &to)| self.graph.find_edge(from, to))
            .ok_or_else(|| GraphError::edge_not_found(source, target))?;
        self.graph.remove_edge(edge);
        debug!("Removed edge {} -- {}", source, target);
        Ok(())
    }

    /// Replace the whole graph with the canonical Karate Club topology
    pub fn reset(&mut self) {
        *self = Self::karate_club();
        debug!("Graph reset to canonical topology");
    }

    /// Take an immutable, compact copy of the current graph
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        let position: HashMap<NodeIndex, usize> = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| self.node_map.get(id).map(|&index| (index, pos)))
            .collect();

        let adjacency = self
            .order
            .iter()
            .map(|id| {
                self.node_map.get(id).map_or_else(Vec::new, |&index| {
                    self.graph
                        .neighbors(index)
                        .filter_map(|neighbor| position.get(&neighbor).copied())
                        .collect()
                })
            })
            .collect();

        GraphSnapshot::from_adjacency(self.order.clone(), adjacency)
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    #[must_use]
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.node_map
            .get(&source)
            .zip(self.node_map.get(&target))
            .is_some_and(|(&from, &to)| self.graph.find_edge(from, to).is_some())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Edges as `(u, v)` pairs, `u` earlier than `v` in insertion order
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.snapshot().edge_ids()
    }

    /// Number of neighbours of a node
    ///
    /// # Errors
    ///
    /// Returns `GraphError::NodeNotFound` if the id is absent.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        let index = self.index_of(id)?;
        Ok(self.graph.neighbors(index).count())
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.node_map
            .get(&id)
            .copied()
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn insert_node(&mut self, id: NodeId) {
        let index = self.graph.add_node(id);
        self.node_map.insert(id, index);
        self.order.push(id);
    }

    fn insert_edge(&mut self, source: NodeId, target: NodeId) {
        if let (Some(&from), Some(&to)) = (self.node_map.get(&source), self.node_map.get(&target)) {
            self.graph.add_edge(from, to, ());
        }
    }
}
