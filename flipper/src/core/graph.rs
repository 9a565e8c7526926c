//! Simple undirected graph snapshots.
//!
//! A [`Graph`] is a plain value: cloning yields an independent copy and every
//! "mutation" in the game builds a new graph. Edges are kept in an ordered set
//! so enumeration (and therefore runner tie-breaking) is deterministic.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unordered pair of distinct vertex ids, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Edge(usize, usize);

impl Edge {
    /// Normalize `{u, v}`. Returns `None` for a self-loop.
    pub fn new(u: usize, v: usize) -> Option<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Some(Self(u, v)),
            std::cmp::Ordering::Greater => Some(Self(v, u)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(self) -> usize {
        self.0
    }

    pub fn high(self) -> usize {
        self.1
    }

    pub fn touches(self, v: usize) -> bool {
        self.0 == v || self.1 == v
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(self, v: usize) -> Option<usize> {
        if self.0 == v {
            Some(self.1)
        } else if self.1 == v {
            Some(self.0)
        } else {
            None
        }
    }
}

impl TryFrom<(usize, usize)> for Edge {
    type Error = String;

    fn try_from((u, v): (usize, usize)) -> Result<Self, Self::Error> {
        Edge::new(u, v).ok_or_else(|| format!("self-loop on vertex {u}"))
    }
}

impl From<Edge> for (usize, usize) {
    fn from(edge: Edge) -> Self {
        (edge.0, edge.1)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Graph over vertices `0..vertex_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    vertex_count: usize,
    edges: BTreeSet<Edge>,
}

impl Graph {
    /// Edge-free graph with `vertex_count` vertices.
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: BTreeSet::new(),
        }
    }

    /// Random graph: each pair `i < j` is an independent Bernoulli trial.
    ///
    /// Pairs are visited in ascending `(i, j)` order, so a seeded `rng`
    /// always produces the same graph. `edge_probability` is clamped to
    /// `[0, 1]`; NaN is treated as 0.
    pub fn generate<R: Rng + ?Sized>(
        vertex_count: usize,
        edge_probability: f64,
        rng: &mut R,
    ) -> Self {
        let p = if edge_probability.is_nan() {
            0.0
        } else {
            edge_probability.clamp(0.0, 1.0)
        };
        let mut graph = Self::empty(vertex_count);
        for i in 0..vertex_count {
            for j in (i + 1)..vertex_count {
                if rng.gen_bool(p) {
                    graph.edges.insert(Edge(i, j));
                }
            }
        }
        graph
    }

    /// Build from explicit pairs, dropping self-loops, duplicates and pairs
    /// with an endpoint outside `0..vertex_count`.
    pub fn from_edges<I>(vertex_count: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::empty(vertex_count);
        for (u, v) in pairs {
            if let Some(edge) = Edge::new(u, v) {
                graph.insert(edge);
            }
        }
        graph
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub fn contains_vertex(&self, v: usize) -> bool {
        v < self.vertex_count
    }

    pub fn has_edge(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Number of edges incident to `v` (0 for unknown vertices).
    pub fn degree(&self, v: usize) -> usize {
        self.edges.iter().filter(|edge| edge.touches(v)).count()
    }

    /// Distinct neighbors of `v` in ascending id order.
    pub fn neighbors(&self, v: usize) -> BTreeSet<usize> {
        self.edges.iter().filter_map(|edge| edge.other(v)).collect()
    }

    /// Insert `edge` if both endpoints exist. Returns whether it was added.
    pub(crate) fn insert(&mut self, edge: Edge) -> bool {
        if !self.contains_vertex(edge.high()) {
            return false;
        }
        self.edges.insert(edge)
    }

    pub(crate) fn remove(&mut self, edge: Edge) -> bool {
        self.edges.remove(&edge)
    }
}

/// Degree query for the rendering layer.
pub fn degree_of(graph: &Graph, v: usize) -> usize {
    graph.degree(v)
}

/// Neighbor query for the rendering layer.
pub fn neighbors_of(graph: &Graph, v: usize) -> BTreeSet<usize> {
    graph.neighbors(v)
}
