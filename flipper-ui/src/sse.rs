//! Server-Sent Events stream of game changes.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

use crate::state::{AppState, GameEvent};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SsePayload {
    #[serde(rename = "type")]
    event_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    removed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<usize>,
}

impl SsePayload {
    fn named(event_type: &'static str) -> Self {
        Self {
            event_type,
            from: None,
            to: None,
            removed: None,
            added: None,
        }
    }
}

impl From<&GameEvent> for SsePayload {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::GameStarted => SsePayload::named("game_started"),
            GameEvent::PartitionsChanged => SsePayload::named("partitions_changed"),
            GameEvent::EdgesFlipped { removed, added } => SsePayload {
                removed: Some(removed),
                added: Some(added),
                ..SsePayload::named("edges_flipped")
            },
            GameEvent::RunnerMoved { from, to } => SsePayload {
                from: Some(from),
                to: Some(to),
                ..SsePayload::named("runner_moved")
            },
            GameEvent::RunnerIsolated { from, to } => SsePayload {
                from: Some(from),
                to: Some(to),
                ..SsePayload::named("runner_isolated")
            },
        }
    }
}

/// SSE endpoint handler.
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_tx.subscribe();

    let stream = async_stream::stream! {
        // Send initial connected event
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            match rx.recv().await {
                Ok(game_event) => {
                    let payload = SsePayload::from(&game_event);
                    if let Ok(json) = serde_json::to_string(&payload) {
                        yield Ok(Event::default().event("change").data(json));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "SSE client lagged, some events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
