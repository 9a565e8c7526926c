//! Test-only helpers for building graphs and games.

use crate::core::game::GameState;
use crate::core::graph::Graph;
use crate::core::partition::{PartitionIndex, Partitions};
use crate::io::config::GameConfig;
use crate::session::Session;

/// Graph with exactly the given edges.
pub fn graph(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(vertex_count, edges.iter().copied())
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path_graph(vertex_count: usize) -> Graph {
    Graph::from_edges(vertex_count, (1..vertex_count).map(|v| (v - 1, v)))
}

/// Game on `graph` with the runner at `start`.
pub fn game(graph: Graph, start: usize) -> GameState {
    GameState::from_graph(graph, start).expect("runner start in range")
}

/// Session wrapping a hand-built game.
pub fn session(graph: Graph, start: usize) -> Session {
    Session::with_state(GameConfig::default(), game(graph, start))
}

/// Partition index from a 0-based position.
pub fn index(i: usize) -> PartitionIndex {
    PartitionIndex::new(i).expect("partition index in range")
}

/// Partitions from three id lists.
pub fn partitions(a: &[usize], b: &[usize], c: &[usize]) -> Partitions {
    Partitions::new([a.to_vec(), b.to_vec(), c.to_vec()])
}
