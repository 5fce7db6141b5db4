//! Degree, betweenness, closeness and eigenvector centrality.
//!
//! Scores are returned as vectors indexed by dense snapshot position.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraphError;
use crate::graph::{GraphSnapshot, NodeId};
use crate::result::{Result, ResultExt};
use crate::statistic::Statistic;

use super::MetricsConfig;

/// The closed set of supported centrality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMeasure {
    Degree,
    Betweenness,
    Closeness,
    Eigenvector,
}

impl CentralityMeasure {
    pub const ALL: [Self; 4] = [
        Self::Degree,
        Self::Betweenness,
        Self::Closeness,
        Self::Eigenvector,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::Eigenvector => "eigenvector",
        }
    }

    /// Score every node of the snapshot.
    ///
    /// # Errors
    ///
    /// Only eigenvector centrality can fail, with `GraphError::Computation`
    /// when power iteration does not converge.
    pub fn scores(self, snapshot: &GraphSnapshot, config: &MetricsConfig) -> Result<Vec<f64>> {
        match self {
            Self::Degree => Ok(degree_centrality(snapshot)),
            Self::Betweenness => Ok(betweenness_centrality(snapshot)),
            Self::Closeness => Ok(closeness_centrality(snapshot)),
            Self::Eigenvector => eigenvector_centrality(
                snapshot,
                config.eigenvector_max_iter,
                config.eigenvector_tolerance,
            ),
        }
    }

    /// Highest-scoring `config.top_k` nodes for this measure.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`scores`](Self::scores).
    pub fn top_nodes(
        self,
        snapshot: &GraphSnapshot,
        config: &MetricsConfig,
    ) -> Result<Vec<RankedNode>> {
        self.scores(snapshot, config)
            .map(|scores| top_k(snapshot, &scores, config.top_k))
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CentralityMeasure {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|measure| measure.as_str() == s)
            .ok_or_else(|| GraphError::unknown_measure(s))
    }
}

/// A node and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub node: NodeId,
    pub score: f64,
}

/// Top-ranked nodes for each measure; a failed measure does not hide the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCentralities {
    pub degree: Statistic<Vec<RankedNode>>,
    pub betweenness: Statistic<Vec<RankedNode>>,
    pub closeness: Statistic<Vec<RankedNode>>,
    pub eigenvector: Statistic<Vec<RankedNode>>,
}

/// Per-node scores for all four measures.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores {
    pub degree: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub closeness: Vec<f64>,
    pub eigenvector: Statistic<Vec<f64>>,
}

impl CentralityScores {
    #[must_use]
    pub fn compute(snapshot: &GraphSnapshot, config: &MetricsConfig) -> Self {
        Self {
            degree: degree_centrality(snapshot),
            betweenness: betweenness_centrality(snapshot),
            closeness: closeness_centrality(snapshot),
            eigenvector: CentralityMeasure::Eigenvector
                .scores(snapshot, config)
                .into_statistic(),
        }
    }

    #[must_use]
    pub fn top(&self, snapshot: &GraphSnapshot, k: usize) -> TopCentralities {
        TopCentralities {
            degree: Statistic::Available(top_k(snapshot, &self.degree, k)),
            betweenness: Statistic::Available(top_k(snapshot, &self.betweenness, k)),
            closeness: Statistic::Available(top_k(snapshot, &self.closeness, k)),
            eigenvector: self
                .eigenvector
                .clone()
                .map(|scores| top_k(snapshot, &scores, k)),
        }
    }
}

/// The `k` highest scores, descending; equal scores keep iteration order.
#[must_use]
pub fn top_k(snapshot: &GraphSnapshot, scores: &[f64], k: usize) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = scores
        .iter()
        .enumerate()
        .filter_map(|(pos, &score)| {
            snapshot.node_id(pos).map(|node| RankedNode {
                node,
                score: if score.is_finite() { score } else { 0.0 },
            })
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    ranked
}

/// `degree / (n - 1)`; every node scores 1 when the graph has at most one node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(snapshot: &GraphSnapshot) -> Vec<f64> {
    let n = snapshot.node_count();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    snapshot
        .degrees()
        .into_iter()
        .map(|d| d as f64 * scale)
        .collect()
}

/// Brandes' algorithm, normalized by `1 / ((n-1)(n-2))`.
///
/// Only reachable pairs contribute, so disconnected graphs are fine.
///
/// # Complexity
///
/// O(V × E)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(snapshot: &GraphSnapshot) -> Vec<f64> {
    let n = snapshot.node_count();
    let mut centrality = vec![0.0_f64; n];
    if n <= 2 {
        return centrality;
    }

    for source in 0..n {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[source] = 1.0;
        dist[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dist_v = dist[v].unwrap_or_default();
            for &w in snapshot.neighbors(v) {
                if dist[w].is_none() {
                    dist[w] = Some(dist_v + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dist_v + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    // every unordered pair was counted from both ends
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    centrality.iter_mut().for_each(|c| *c *= scale);
    centrality
}

/// Wasserman–Faust closeness: `(r / (n-1)) * (r / sum_of_distances)` over
/// the `r` nodes reachable from each node.
///
/// # Complexity
///
/// O(V × (V + E))
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(snapshot: &GraphSnapshot) -> Vec<f64> {
    let n = snapshot.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }

    (0..n)
        .map(|source| {
            let distances = super::connectivity::bfs_distances(snapshot, source);
            let (reachable, total) = distances
                .iter()
                .flatten()
                .filter(|&&d| d > 0)
                .fold((0_usize, 0_usize), |(count, sum), &d| (count + 1, sum + d));
            if reachable == 0 || total == 0 {
                return 0.0;
            }
            let r = reachable as f64;
            (r / (n - 1) as f64) * (r / total as f64)
        })
        .collect()
}

/// Power iteration on `A + I`, starting from the uniform vector.
///
/// Stops when the L1 change between iterations drops below `n × tolerance`.
///
/// # Errors
///
/// Returns `GraphError::Computation` if the iteration has not converged
/// after `max_iter` steps.
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    snapshot: &GraphSnapshot,
    max_iter: usize,
    tolerance: f64,
) -> Result<Vec<f64>> {
    let n = snapshot.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut x = vec![1.0 / n as f64; n];
    for iteration in 0..max_iter {
        let mut next = x.clone();
        for (u, &xu) in x.iter().enumerate() {
            for &v in snapshot.neighbors(u) {
                next[v] += xu;
            }
        }

        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        next.iter_mut().for_each(|v| *v /= norm);

        let change: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        if !change.is_finite() {
            return Err(GraphError::computation(
                "eigenvector centrality",
                "power iteration produced a non-finite vector",
            ));
        }
        if change < n as f64 * tolerance {
            debug!("Eigenvector centrality converged after {} iterations", iteration + 1);
            return Ok(next);
        }
        x = next;
    }

    Err(GraphError::computation(
        "eigenvector centrality",
        format!("power iteration did not converge within {max_iter} iterations"),
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::graph::GraphStore;

    fn karate() -> GraphSnapshot {
        GraphStore::karate_club().snapshot()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_measure_parsing() {
        assert_eq!(
            "betweenness".parse::<CentralityMeasure>(),
            Ok(CentralityMeasure::Betweenness)
        );
        assert_eq!(
            "Eigenvector".parse::<CentralityMeasure>(),
            Err(GraphError::UnknownMeasure("Eigenvector".to_string()))
        );
        assert_eq!(
            " degree".parse::<CentralityMeasure>(),
            Err(GraphError::UnknownMeasure(" degree".to_string()))
        );
        assert_eq!(
            "pagerank".parse::<CentralityMeasure>(),
            Err(GraphError::UnknownMeasure("pagerank".to_string()))
        );
    }

    #[test]
    fn test_measure_round_trips_through_display() {
        for measure in CentralityMeasure::ALL {
            assert_eq!(measure.to_string().parse::<CentralityMeasure>(), Ok(measure));
        }
    }

    #[test]
    fn test_karate_degree_top_five() {
        let snapshot = karate();
        let top = top_k(&snapshot, &degree_centrality(&snapshot), 5);
        let nodes: Vec<NodeId> = top.iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![33, 0, 32, 2, 1]);
        assert!(close(top[0].score, 17.0 / 33.0));
    }

    #[test]
    fn test_karate_betweenness() {
        let snapshot = karate();
        let scores = betweenness_centrality(&snapshot);
        assert!(close(scores[0], 0.437_635_281_385_281_46));
        assert!(close(scores[33], 0.304_074_975_949_975_96));
        let nodes: Vec<NodeId> = top_k(&snapshot, &scores, 5).iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![0, 33, 32, 2, 31]);
    }

    #[test]
    fn test_karate_closeness() {
        let snapshot = karate();
        let scores = closeness_centrality(&snapshot);
        assert!(close(scores[0], 0.568_965_517_241_379_3));
        let nodes: Vec<NodeId> = top_k(&snapshot, &scores, 5).iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![0, 2, 33, 31, 8]);
    }

    #[test]
    fn test_karate_eigenvector() {
        let snapshot = karate();
        let scores = eigenvector_centrality(&snapshot, 1000, 1e-6).expect("karate converges");
        assert!((scores[33] - 0.373_371_213_013_235).abs() < 1e-4);
        assert!((scores[0] - 0.355_483_494_185_194).abs() < 1e-4);
        let nodes: Vec<NodeId> = top_k(&snapshot, &scores, 5).iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![33, 0, 2, 32, 1]);
    }

    #[test]
    fn test_eigenvector_non_convergence_is_an_error() {
        let result = eigenvector_centrality(&karate(), 1, 1e-6);
        assert!(matches!(result, Err(GraphError::Computation { .. })));
    }

    #[test]
    fn test_eigenvector_converges_on_bipartite_star() {
        let store = GraphStore::from_edges([0, 1, 2, 3], [(0, 1), (0, 2), (0, 3)]).unwrap();
        let scores = eigenvector_centrality(&store.snapshot(), 1000, 1e-6).unwrap();
        assert!((scores[0] - 0.707_106_878).abs() < 1e-4);
        assert!((scores[1] - 0.408_248_234).abs() < 1e-4);
    }

    #[test]
    fn test_path_betweenness_and_closeness() {
        let store = GraphStore::from_edges([0, 1, 2], [(0, 1), (1, 2)]).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(betweenness_centrality(&snapshot), vec![0.0, 1.0, 0.0]);
        let closeness = closeness_centrality(&snapshot);
        assert!(close(closeness[0], 2.0 / 3.0));
        assert!(close(closeness[1], 1.0));
    }

    #[test]
    fn test_disconnected_closeness_uses_reachable_nodes() {
        // path 0-1-4 and a separate edge 2-3
        let store = GraphStore::from_edges([0, 1, 2, 3, 4], [(0, 1), (2, 3), (1, 4)]).unwrap();
        let snapshot = store.snapshot();
        let closeness = closeness_centrality(&snapshot);
        assert!(close(closeness[1], 0.5));
        assert!(close(closeness[2], 0.25));
        let betweenness = betweenness_centrality(&snapshot);
        assert!(close(betweenness[1], 1.0 / 6.0));
    }

    #[test]
    fn test_tiny_graphs() {
        let single = GraphStore::from_edges([7], []).unwrap().snapshot();
        assert_eq!(degree_centrality(&single), vec![1.0]);
        assert_eq!(betweenness_centrality(&single), vec![0.0]);
        assert_eq!(closeness_centrality(&single), vec![0.0]);

        let empty = GraphStore::new().snapshot();
        assert!(degree_centrality(&empty).is_empty());
        assert!(eigenvector_centrality(&empty, 1000, 1e-6).unwrap().is_empty());
        assert!(top_k(&empty, &[], 5).is_empty());
    }

    #[test]
    fn test_top_k_ties_keep_iteration_order() {
        let store = GraphStore::from_edges([9, 4, 7, 1], []).unwrap();
        let snapshot = store.snapshot();
        let top = top_k(&snapshot, &[0.5, 0.5, 0.9, 0.5], 3);
        let nodes: Vec<NodeId> = top.iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![7, 9, 4]);
    }

    #[test]
    fn test_failed_eigenvector_only_marks_its_own_list() {
        let snapshot = karate();
        let config = MetricsConfig {
            eigenvector_max_iter: 1,
            ..MetricsConfig::default()
        };
        let top = CentralityScores::compute(&snapshot, &config).top(&snapshot, 5);
        assert!(top.degree.is_available());
        assert!(top.betweenness.is_available());
        assert!(top.closeness.is_available());
        assert!(matches!(top.eigenvector, Statistic::Unavailable(_)));
    }
}
