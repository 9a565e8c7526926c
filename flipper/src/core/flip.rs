//! Edge classification and flipping between vertex groups.

use std::collections::BTreeSet;

use crate::core::graph::{Edge, Graph};

/// Vertex pairs a flip considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairScope<'a> {
    /// Every pair of distinct vertices inside one group.
    Within(&'a [usize]),
    /// The cross product of two groups, minus same-vertex pairs.
    Between(&'a [usize], &'a [usize]),
}

impl PairScope<'_> {
    /// Relevant unordered pairs. Repeated ids and repeated pairs count once.
    pub fn pairs(&self) -> BTreeSet<Edge> {
        match *self {
            PairScope::Within(group) => {
                let group = dedup_preserving_order(group);
                let mut pairs = BTreeSet::new();
                for (i, &u) in group.iter().enumerate() {
                    for &v in &group[i + 1..] {
                        pairs.extend(Edge::new(u, v));
                    }
                }
                pairs
            }
            PairScope::Between(a, b) => a
                .iter()
                .flat_map(|&u| b.iter().filter_map(move |&v| Edge::new(u, v)))
                .collect(),
        }
    }
}

/// Relevant pairs split by current edge presence.
///
/// `present` and `absent` are disjoint and together cover the relevant pairs.
/// Pairs naming a vertex outside the graph land in `absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub present: BTreeSet<Edge>,
    pub absent: BTreeSet<Edge>,
}

pub fn classify(graph: &Graph, scope: PairScope<'_>) -> Classification {
    let (present, absent): (BTreeSet<Edge>, BTreeSet<Edge>) = scope
        .pairs()
        .into_iter()
        .partition(|&edge| graph.has_edge(edge));
    Classification { present, absent }
}

/// Result of [`flip`]: the new graph and the edges that actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flipped {
    pub graph: Graph,
    pub removed: Vec<Edge>,
    pub added: Vec<Edge>,
}

/// Toggle every relevant pair: present edges go, absent pairs appear.
///
/// Absent pairs naming unknown vertices are dropped without error. Applying
/// the same scope twice restores the original edge set.
pub fn flip(graph: &Graph, scope: PairScope<'_>) -> Flipped {
    let Classification { present, absent } = classify(graph, scope);
    let mut next = graph.clone();

    let removed: Vec<Edge> = present.into_iter().filter(|&e| next.remove(e)).collect();
    let added: Vec<Edge> = absent.into_iter().filter(|&e| next.insert(e)).collect();

    Flipped {
        graph: next,
        removed,
        added,
    }
}

fn dedup_preserving_order(group: &[usize]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    group.iter().copied().filter(|v| seen.insert(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: usize, v: usize) -> Edge {
        Edge::new(u, v).expect("edge")
    }

    fn edge_set(pairs: &[(usize, usize)]) -> BTreeSet<Edge> {
        pairs.iter().map(|&(u, v)| edge(u, v)).collect()
    }

    #[test]
    fn classify_between_groups() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2)]);
        let result = classify(&graph, PairScope::Between(&[0, 1], &[2, 3]));
        assert_eq!(result.present, edge_set(&[(1, 2)]));
        assert_eq!(result.absent, edge_set(&[(0, 2), (0, 3), (1, 3)]));
    }

    #[test]
    fn flip_between_groups() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2)]);
        let flipped = flip(&graph, PairScope::Between(&[0, 1], &[2, 3]));
        let edges: BTreeSet<Edge> = flipped.graph.edges().collect();
        assert_eq!(edges, edge_set(&[(0, 1), (0, 2), (0, 3), (1, 3)]));
        assert_eq!(flipped.removed, vec![edge(1, 2)]);
        assert_eq!(flipped.added, vec![edge(0, 2), edge(0, 3), edge(1, 3)]);
    }

    #[test]
    fn classify_within_group_skips_self_pairs_and_duplicates() {
        let graph = Graph::from_edges(4, [(0, 2)]);
        let result = classify(&graph, PairScope::Within(&[0, 2, 0, 3]));
        assert_eq!(result.present, edge_set(&[(0, 2)]));
        assert_eq!(result.absent, edge_set(&[(0, 3), (2, 3)]));
    }

    #[test]
    fn classify_between_excludes_shared_vertices() {
        let graph = Graph::empty(3);
        let result = classify(&graph, PairScope::Between(&[0, 1], &[1, 2]));
        assert_eq!(result.absent, edge_set(&[(0, 1), (0, 2), (1, 2)]));
        assert!(result.present.is_empty());
    }

    #[test]
    fn classify_covers_relevant_pairs_disjointly() {
        let graph = Graph::from_edges(6, [(0, 3), (1, 4), (2, 5), (0, 1)]);
        let scope = PairScope::Between(&[0, 1, 2], &[3, 4, 5, 9]);
        let result = classify(&graph, scope);
        assert!(result.present.is_disjoint(&result.absent));
        let union: BTreeSet<Edge> = result.present.union(&result.absent).copied().collect();
        assert_eq!(union, scope.pairs());
        assert_eq!(union.len(), 12);
    }

    #[test]
    fn flip_drops_out_of_range_pairs() {
        let graph = Graph::from_edges(3, [(0, 1)]);
        let flipped = flip(&graph, PairScope::Between(&[0], &[1, 2, 7]));
        let edges: BTreeSet<Edge> = flipped.graph.edges().collect();
        assert_eq!(edges, edge_set(&[(0, 2)]));
        assert_eq!(flipped.graph.vertex_count(), 3);
    }

    #[test]
    fn flip_twice_restores_edges() {
        let graph = Graph::from_edges(6, [(0, 1), (0, 4), (2, 3), (3, 5)]);
        for scope in [
            PairScope::Between(&[0, 1, 2], &[3, 4, 8]),
            PairScope::Within(&[0, 1, 3, 5, 5]),
            PairScope::Between(&[0, 3], &[3, 0, 1]),
        ] {
            let once = flip(&graph, scope);
            let twice = flip(&once.graph, scope);
            assert_eq!(twice.graph, graph);
        }
    }

    #[test]
    fn flip_leaves_source_untouched() {
        let graph = Graph::from_edges(3, [(0, 1)]);
        let _ = flip(&graph, PairScope::Within(&[0, 1, 2]));
        assert_eq!(graph, Graph::from_edges(3, [(0, 1)]));
    }
}
