//! Game state and turn transitions.
//!
//! A game tracks three snapshots: `original` (fixed for the game),
//! `previous` (the graph the runner last moved on) and `current` (the
//! working copy the player flips). Each operation computes the complete next
//! state from the pre-transition state before committing it, so callers
//! never observe a half-applied turn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::flip::{PairScope, flip};
use crate::core::graph::{Edge, Graph};
use crate::core::partition::{FlipSelection, PartitionIndex, Partitions};
use crate::core::runner::{Phase, is_isolated, move_runner};

/// Smallest playable vertex count; smaller requests are raised to this.
pub const MIN_VERTICES: usize = 3;

/// Largest vertex count a game may be started with. Larger requests are
/// rejected at the config, CLI and HTTP boundaries and lowered to this here.
pub const MAX_VERTICES: usize = 500;

pub fn clamp_vertex_count(vertex_count: usize) -> usize {
    vertex_count.clamp(MIN_VERTICES, MAX_VERTICES)
}

/// Error message for a vertex count above [`MAX_VERTICES`], if any.
pub fn check_vertex_limit(vertex_count: usize) -> Result<(), String> {
    if vertex_count > MAX_VERTICES {
        return Err(format!(
            "vertices must be at most {MAX_VERTICES}, got {vertex_count}"
        ));
    }
    Ok(())
}

/// Errors surfaced by game operations. The state is unchanged when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Both sides of a between-partitions flip name the same partition.
    SamePartition(PartitionIndex),
    /// Runner start position is not a vertex of the graph.
    RunnerOutOfRange { position: usize, vertex_count: usize },
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::SamePartition(index) => write!(
                f,
                "select two different partitions ({index} was chosen twice)"
            ),
            GameError::RunnerOutOfRange {
                position,
                vertex_count,
            } => write!(
                f,
                "runner position {position} is outside the graph (0..{vertex_count})"
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Result of a flip request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlipOutcome {
    /// `current` was replaced by the flipped graph.
    Applied { removed: Vec<Edge>, added: Vec<Edge> },
    /// The game is over; nothing changed.
    Ignored,
}

/// Result of ending the flip phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Runner moved and the snapshots rotated for the next turn.
    Moved { from: usize, to: usize },
    /// Runner ended on an isolated vertex. Snapshots are frozen.
    Isolated { from: usize, to: usize },
    /// No runner placed yet; snapshots rotated without a move.
    NoRunner,
    /// The game is over; nothing changed.
    Ignored,
}

impl TurnOutcome {
    /// Phase reached by this outcome.
    pub fn phase(self) -> Phase {
        match self {
            TurnOutcome::Moved { .. } | TurnOutcome::NoRunner => Phase::TurnResolved,
            TurnOutcome::Isolated { .. } | TurnOutcome::Ignored => Phase::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub original: Graph,
    pub previous: Graph,
    pub current: Graph,
    pub runner_pos: Option<usize>,
    pub runner_pos_prev: Option<usize>,
    pub winner: bool,
    /// Resolved turns that did not end the game.
    pub turn: u32,
}

/// Start a game on a random graph with the runner on a random vertex.
///
/// `vertex_count` is clamped to [`MIN_VERTICES`]`..=`[`MAX_VERTICES`].
pub fn init_game<R: Rng + ?Sized>(
    vertex_count: usize,
    edge_probability: f64,
    rng: &mut R,
) -> GameState {
    let vertex_count = clamp_vertex_count(vertex_count);
    let graph = Graph::generate(vertex_count, edge_probability, rng);
    let start = rng.gen_range(0..vertex_count);
    GameState::with_runner(graph, Some(start))
}

impl GameState {
    /// Start a game on a given graph.
    pub fn from_graph(graph: Graph, start: usize) -> Result<Self, GameError> {
        if !graph.contains_vertex(start) {
            return Err(GameError::RunnerOutOfRange {
                position: start,
                vertex_count: graph.vertex_count(),
            });
        }
        Ok(Self::with_runner(graph, Some(start)))
    }

    /// Start a game whose runner is not placed yet.
    pub fn unplaced(graph: Graph) -> Self {
        Self::with_runner(graph, None)
    }

    fn with_runner(graph: Graph, start: Option<usize>) -> Self {
        Self {
            original: graph.clone(),
            previous: graph.clone(),
            current: graph,
            runner_pos: start,
            runner_pos_prev: start,
            winner: false,
            turn: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.winner {
            Phase::GameOver
        } else {
            Phase::AwaitingTurn
        }
    }

    /// Flip the selected pairs of `current`.
    ///
    /// `Between(i, i)` is rejected; a single group is flipped with `Within`.
    /// On a finished game this is a no-op.
    pub fn flip_edges(
        &mut self,
        partitions: &Partitions,
        selection: FlipSelection,
    ) -> Result<FlipOutcome, GameError> {
        if self.winner {
            return Ok(FlipOutcome::Ignored);
        }
        let scope = match selection {
            FlipSelection::Between(a, b) if a == b => return Err(GameError::SamePartition(a)),
            FlipSelection::Between(a, b) => {
                PairScope::Between(partitions.group(a), partitions.group(b))
            }
            FlipSelection::Within(a) => PairScope::Within(partitions.group(a)),
        };

        let flipped = flip(&self.current, scope);
        self.current = flipped.graph;
        Ok(FlipOutcome::Applied {
            removed: flipped.removed,
            added: flipped.added,
        })
    }

    /// Close the flip phase: move the runner, check isolation, and either
    /// end the game or rotate snapshots for the next turn.
    pub fn done_flipping(&mut self) -> TurnOutcome {
        if self.winner {
            return TurnOutcome::Ignored;
        }
        let (next, outcome) = self.resolve_turn();
        *self = next;
        outcome
    }

    fn resolve_turn(&self) -> (GameState, TurnOutcome) {
        let Some(from) = self.runner_pos_prev else {
            let next = self.rotated(None);
            return (next, TurnOutcome::NoRunner);
        };

        let to = move_runner(&self.previous, &self.current, from);
        if is_isolated(&self.current, to) {
            let next = GameState {
                runner_pos: Some(to),
                winner: true,
                ..self.clone()
            };
            return (next, TurnOutcome::Isolated { from, to });
        }

        (self.rotated(Some(to)), TurnOutcome::Moved { from, to })
    }

    fn rotated(&self, runner: Option<usize>) -> GameState {
        GameState {
            original: self.original.clone(),
            previous: self.current.clone(),
            current: self.original.clone(),
            runner_pos: runner,
            runner_pos_prev: runner,
            winner: false,
            turn: self.turn + 1,
        }
    }
}
