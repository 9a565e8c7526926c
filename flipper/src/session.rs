//! Single-owner handle for one game and its partitions.
//!
//! Both the text session and the HTTP server drive games through a
//! `Session`: it bundles the game state with the three partitions the
//! player is editing and the random source for new games. Every method takes
//! `&mut self`, so a turn transition can never interleave with a flip.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::core::game::{FlipOutcome, GameError, GameState, TurnOutcome, init_game};
use crate::core::partition::{FlipSelection, PartitionIndex, Partitions, parse_vertex_list};
use crate::io::config::GameConfig;

pub struct Session {
    config: GameConfig,
    state: GameState,
    partitions: Partitions,
    rng: StdRng,
}

impl Session {
    /// Start a session and its first game from `config`.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = rng_for(&config);
        let state = init_game(config.vertices, config.edge_probability, &mut rng);
        log_new_game(&state);
        Self {
            config,
            state,
            partitions: Partitions::default(),
            rng,
        }
    }

    /// Wrap an existing game (e.g. a hand-built graph).
    pub fn with_state(config: GameConfig, state: GameState) -> Self {
        Self {
            rng: rng_for(&config),
            config,
            state,
            partitions: Partitions::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn partitions(&self) -> &Partitions {
        &self.partitions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the game, keeping the random stream. Partitions are cleared.
    ///
    /// `vertices` and `edge_probability` override the config for this game
    /// only.
    pub fn new_game(
        &mut self,
        vertices: Option<usize>,
        edge_probability: Option<f64>,
    ) -> &GameState {
        let vertices = vertices.unwrap_or(self.config.vertices);
        let edge_probability = edge_probability.unwrap_or(self.config.edge_probability);
        self.state = init_game(vertices, edge_probability, &mut self.rng);
        self.partitions = Partitions::default();
        log_new_game(&self.state);
        &self.state
    }

    /// Set one partition from free text. Returns the ids that were kept.
    pub fn set_partition(&mut self, index: PartitionIndex, text: &str) -> &[usize] {
        let group = parse_vertex_list(text);
        debug!(partition = index.label(), ?group, "partition set");
        self.partitions.set_group(index, group);
        self.partitions.group(index)
    }

    pub fn set_partitions(&mut self, partitions: Partitions) {
        debug!(?partitions, "partitions replaced");
        self.partitions = partitions;
    }

    pub fn flip(&mut self, selection: FlipSelection) -> Result<FlipOutcome, GameError> {
        let outcome = self.state.flip_edges(&self.partitions, selection);
        match &outcome {
            Ok(FlipOutcome::Applied { removed, added }) => {
                debug!(?selection, removed = removed.len(), added = added.len(), "edges flipped");
            }
            Ok(FlipOutcome::Ignored) => debug!(?selection, "flip ignored, game is over"),
            Err(err) => debug!(?selection, error = %err, "flip rejected"),
        }
        outcome
    }

    pub fn done_flipping(&mut self) -> TurnOutcome {
        let outcome = self.state.done_flipping();
        match outcome {
            TurnOutcome::Isolated { from, to } => {
                info!(from, to, turn = self.state.turn, "runner isolated");
            }
            TurnOutcome::Moved { from, to } => {
                debug!(from, to, turn = self.state.turn, "runner moved");
            }
            TurnOutcome::NoRunner => debug!(turn = self.state.turn, "turn ended without runner"),
            TurnOutcome::Ignored => debug!("turn ignored, game is over"),
        }
        outcome
    }
}

fn rng_for(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn log_new_game(state: &GameState) {
    info!(
        vertices = state.original.vertex_count(),
        edges = state.original.edge_count(),
        runner = ?state.runner_pos,
        "new game"
    );
}
