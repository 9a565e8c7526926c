//! Shared application state for the UI server.

use std::sync::Arc;

use flipper::core::game::TurnOutcome;
use flipper::session::Session;
use tokio::sync::{Mutex, broadcast};

/// Events broadcast to SSE clients after a mutation commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    PartitionsChanged,
    EdgesFlipped { removed: usize, added: usize },
    RunnerMoved { from: usize, to: usize },
    RunnerIsolated { from: usize, to: usize },
}

impl GameEvent {
    /// Event for a turn outcome, if the turn changed anything.
    pub fn from_turn(outcome: TurnOutcome) -> Option<Self> {
        match outcome {
            TurnOutcome::Moved { from, to } => Some(GameEvent::RunnerMoved { from, to }),
            TurnOutcome::Isolated { from, to } => Some(GameEvent::RunnerIsolated { from, to }),
            TurnOutcome::NoRunner | TurnOutcome::Ignored => None,
        }
    }
}

/// Shared state accessible from all request handlers.
///
/// The session sits behind one async mutex. Handlers hold the lock for
/// the whole operation, so flips and turn transitions are serialized.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    /// Broadcast sender for game change events.
    pub event_tx: Arc<broadcast::Sender<GameEvent>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            session: Arc::new(Mutex::new(session)),
            event_tx: Arc::new(event_tx),
        }
    }

    /// Publish an event; having no subscribers is fine.
    pub fn publish(&self, event: GameEvent) {
        let _ = self.event_tx.send(event);
    }
}
