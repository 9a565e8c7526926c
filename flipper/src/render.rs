//! Plain-text listing of game snapshots for the terminal.

use std::fmt::Write as _;

use crate::core::game::GameState;
use crate::core::graph::Graph;
use crate::core::partition::{PartitionIndex, Partitions};

/// Adjacency listing of one snapshot, marking the runner with `*`.
///
/// ```text
/// current G_i (4 edges)
///   0: 1 3
///  *1: 0
/// ```
pub fn render_graph(title: &str, graph: &Graph, runner: Option<usize>) -> String {
    let mut out = format!("{} ({} edges)\n", title, graph.edge_count());
    for v in 0..graph.vertex_count() {
        let marker = if runner == Some(v) { '*' } else { ' ' };
        let neighbors: Vec<String> = graph.neighbors(v).iter().map(|n| n.to_string()).collect();
        let _ = writeln!(out, " {}{}: {}", marker, v, neighbors.join(" "));
    }
    out
}

/// The three snapshots as shown after every action.
pub fn render_state(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str(&render_graph("original G_0", &state.original, None));
    out.push_str(&render_graph(
        "previous G_{i-1}",
        &state.previous,
        state.runner_pos_prev,
    ));
    out.push_str(&render_graph("current G_i", &state.current, state.runner_pos));
    let _ = writeln!(
        out,
        "turn {} | runner at {}",
        state.turn,
        state
            .runner_pos
            .map_or_else(|| "-".to_string(), |pos| pos.to_string())
    );
    out
}

pub fn render_partitions(partitions: &Partitions) -> String {
    let mut out = String::new();
    for index in PartitionIndex::all() {
        let ids: Vec<String> = partitions
            .group(index)
            .iter()
            .map(|v| v.to_string())
            .collect();
        let _ = writeln!(out, "partition {}: [{}]", index.label(), ids.join(", "));
    }
    out
}
