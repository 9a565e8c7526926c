//! Invariants of graphs and game states that serde alone cannot enforce.

use crate::core::game::GameState;
use crate::core::graph::Graph;

/// Check graph invariants:
/// - Every edge endpoint is a vertex of the graph
///
/// Self-loops and duplicate edges are unrepresentable by construction.
pub fn validate_graph(graph: &Graph, label: &str) -> Vec<String> {
    graph
        .edges()
        .filter(|edge| !graph.contains_vertex(edge.high()))
        .map(|edge| {
            format!(
                "{}: edge {} references a vertex outside 0..{}",
                label,
                edge,
                graph.vertex_count()
            )
        })
        .collect()
}

/// Check game invariants:
/// - Each snapshot satisfies [`validate_graph`]
/// - All snapshots share one vertex count
/// - Runner positions are unset or valid vertices
pub fn validate_game(state: &GameState) -> Vec<String> {
    let mut errors = Vec::new();
    let snapshots = [
        ("original", &state.original),
        ("previous", &state.previous),
        ("current", &state.current),
    ];
    for (label, graph) in snapshots {
        errors.extend(validate_graph(graph, label));
    }

    let n = state.original.vertex_count();
    for (label, graph) in &snapshots[1..] {
        if graph.vertex_count() != n {
            errors.push(format!(
                "{}: vertex count {} differs from original {}",
                label,
                graph.vertex_count(),
                n
            ));
        }
    }

    for (label, pos) in [
        ("runner_pos", state.runner_pos),
        ("runner_pos_prev", state.runner_pos_prev),
    ] {
        if let Some(pos) = pos
            && pos >= n
        {
            errors.push(format!("{}: {} is outside 0..{}", label, pos, n));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_game_has_no_errors() {
        let graph = Graph::from_edges(4, [(0, 1), (2, 3)]);
        let state = GameState::from_graph(graph, 1).expect("state");
        assert!(validate_game(&state).is_empty());
    }

    #[test]
    fn deserialized_game_reports_violations() {
        let raw = r#"{
            "original": {"vertex_count": 3, "edges": [[0, 5]]},
            "previous": {"vertex_count": 3, "edges": []},
            "current": {"vertex_count": 4, "edges": []},
            "runner_pos": 7,
            "runner_pos_prev": 0,
            "winner": false,
            "turn": 0
        }"#;
        let state: GameState = serde_json::from_str(raw).expect("parse");
        let errors = validate_game(&state);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|err| err.contains("edge 0-5")));
        assert!(errors.iter().any(|err| err.contains("current: vertex count 4")));
        assert!(errors.iter().any(|err| err.contains("runner_pos: 7")));
    }
}
