//! Error taxonomy for graph mutations and metric computations.
//!
//! Mutation errors are always local: the store is left exactly as it was
//! before the failed call.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by the graph store and the metrics engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node already exists: {0}")]
    DuplicateNode(NodeId),

    #[error("edge already exists: {0} -- {1}")]
    DuplicateEdge(NodeId, NodeId),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge not found: {0} -- {1}")]
    EdgeNotFound(NodeId, NodeId),

    #[error("self-loop rejected on node {0}")]
    SelfLoop(NodeId),

    #[error("unknown centrality measure '{0}' (expected degree, betweenness, closeness or eigenvector)")]
    UnknownMeasure(String),

    #[error("failed to compute {statistic}: {reason}")]
    Computation { statistic: String, reason: String },
}

impl GraphError {
    pub const fn duplicate_edge(source: NodeId, target: NodeId) -> Self {
        Self::DuplicateEdge(source, target)
    }

    pub const fn edge_not_found(source: NodeId, target: NodeId) -> Self {
        Self::EdgeNotFound(source, target)
    }

    pub fn unknown_measure(name: impl Into<String>) -> Self {
        Self::UnknownMeasure(name.into())
    }

    pub fn computation(statistic: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Computation {
            statistic: statistic.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a reference to something absent from the graph.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::EdgeNotFound(_, _))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_ids() {
        assert_eq!(GraphError::DuplicateNode(7).to_string(), "node already exists: 7");
        assert_eq!(
            GraphError::edge_not_found(1, 2).to_string(),
            "edge not found: 1 -- 2"
        );
    }

    #[test]
    fn test_computation_error_carries_statistic() {
        let err = GraphError::computation("eigenvector", "did not converge");
        assert_eq!(
            err.to_string(),
            "failed to compute eigenvector: did not converge"
        );
    }

    #[test]
    fn test_not_found_classification() {
        assert!(GraphError::NodeNotFound(3).is_not_found());
        assert!(GraphError::edge_not_found(3, 4).is_not_found());
        assert!(!GraphError::DuplicateNode(3).is_not_found());
        assert!(!GraphError::unknown_measure("pagerank").is_not_found());
    }
}
