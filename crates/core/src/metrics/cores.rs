//! k-core decomposition (Batagelj–Zaversnik bucket peeling, O(V + E)).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::GraphSnapshot;

/// Summary of the core decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KCoreSummary {
    pub max_core: usize,
    /// Core level -> number of nodes whose core number is exactly that level,
    /// for every level from 0 to `max_core`
    pub distribution: BTreeMap<usize, usize>,
}

/// Core number of every node, in iteration order.
#[must_use]
pub fn core_numbers(snapshot: &GraphSnapshot) -> Vec<usize> {
    let n = snapshot.node_count();
    let mut degree = snapshot.degrees();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bucket start offsets, nodes sorted by degree
    let mut bin = vec![0_usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in &mut bin {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut pos = vec![0_usize; n];
    let mut vert = vec![0_usize; n];
    for v in 0..n {
        pos[v] = bin[degree[v]];
        vert[pos[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = vert[i];
        for &u in snapshot.neighbors(v) {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = pos[u];
                let pw = bin[du];
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

#[must_use]
pub fn k_core_summary(cores: &[usize]) -> KCoreSummary {
    let max_core = cores.iter().copied().max().unwrap_or(0);
    let mut distribution: BTreeMap<usize, usize> = (0..=max_core).map(|k| (k, 0)).collect();
    for &core in cores {
        *distribution.entry(core).or_insert(0) += 1;
    }
    KCoreSummary {
        max_core,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_karate_cores() {
        let snapshot = GraphStore::karate_club().snapshot();
        let cores = core_numbers(&snapshot);
        assert_eq!(cores[0], 4);
        assert_eq!(cores[11], 1);
        let summary = k_core_summary(&cores);
        assert_eq!(summary.max_core, 4);
        assert_eq!(
            summary.distribution,
            BTreeMap::from([(0, 0), (1, 1), (2, 11), (3, 12), (4, 10)])
        );
    }

    #[test]
    fn test_clique_with_tail() {
        // K4 on 1..=4 plus a pendant 5 and an isolated 6
        let store = GraphStore::from_edges(
            [1, 2, 3, 4, 5, 6],
            [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4), (4, 5)],
        )
        .unwrap();
        let cores = core_numbers(&store.snapshot());
        assert_eq!(cores, vec![3, 3, 3, 3, 1, 0]);
    }

    #[test]
    fn test_every_core_member_has_enough_neighbours_in_core() {
        let snapshot = GraphStore::karate_club().snapshot();
        let cores = core_numbers(&snapshot);
        for (v, &k) in cores.iter().enumerate() {
            let inside = snapshot
                .neighbors(v)
                .iter()
                .filter(|&&u| cores[u] >= k)
                .count();
            assert!(inside >= k);
        }
    }

    #[test]
    fn test_empty_graph_summary() {
        let summary = k_core_summary(&core_numbers(&GraphStore::new().snapshot()));
        assert_eq!(summary.max_core, 0);
        assert_eq!(summary.distribution, BTreeMap::from([(0, 0)]));
    }
}
