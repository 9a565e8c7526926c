//! Runner movement and the isolation win condition.

use serde::{Deserialize, Serialize};

use crate::core::graph::Graph;

/// Where a game stands between player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The player may flip edges on the current snapshot.
    AwaitingTurn,
    /// Flip phase closed and the runner has moved; reported once per turn.
    TurnResolved,
    /// The runner is isolated. No further transitions are accepted.
    GameOver,
}

/// Greedy runner step.
///
/// Candidates are the neighbors of `prev_pos` in `previous`, visited in
/// ascending id order. The runner takes the candidate with the highest
/// degree in `post_flip`; the first one seen wins ties. With no candidates
/// the runner stays put.
pub fn move_runner(previous: &Graph, post_flip: &Graph, prev_pos: usize) -> usize {
    let mut best = prev_pos;
    let mut best_degree = None;
    for candidate in previous.neighbors(prev_pos) {
        let degree = post_flip.degree(candidate);
        if best_degree.is_none_or(|current| degree > current) {
            best = candidate;
            best_degree = Some(degree);
        }
    }
    best
}

/// Win condition: the runner's vertex has no incident edges.
pub fn is_isolated(graph: &Graph, pos: usize) -> bool {
    graph.degree(pos) == 0
}
