//! HTTP route handlers for the game API.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use flipper::core::game::{FlipOutcome, GameState, TurnOutcome, check_vertex_limit};
use flipper::core::graph::{Graph, degree_of, neighbors_of};
use flipper::core::partition::{FlipSelection, PARTITION_COUNT, PartitionIndex, Partitions};
use flipper::core::runner::Phase;
use flipper::session::Session;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::{AppState, GameEvent};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/game", get(get_game).post(new_game))
        .route("/partitions", put(put_partitions))
        .route("/flip", post(flip))
        .route("/flip-within", post(flip_within))
        .route("/done", post(done))
        .route("/vertices/{vertex}", get(get_vertex))
}

type ApiError = (StatusCode, Json<ErrorBody>);

#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

fn unprocessable(message: impl Into<String>) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Snapshots and runner state as shown to the rendering layer.
#[derive(Debug, Serialize, Deserialize)]
struct GameView {
    original: Graph,
    previous: Graph,
    current: Graph,
    runner_pos: Option<usize>,
    runner_pos_prev: Option<usize>,
    winner: bool,
    turn: u32,
    phase: Phase,
    partitions: [Vec<usize>; PARTITION_COUNT],
}

impl GameView {
    fn of(session: &Session) -> Self {
        let state: &GameState = session.state();
        Self {
            original: state.original.clone(),
            previous: state.previous.clone(),
            current: state.current.clone(),
            runner_pos: state.runner_pos,
            runner_pos_prev: state.runner_pos_prev,
            winner: state.winner,
            turn: state.turn,
            phase: state.phase(),
            partitions: session.partitions().groups().clone(),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/game - current snapshots and runner.
async fn get_game(State(state): State<AppState>) -> Json<GameView> {
    let session = state.session.lock().await;
    Json(GameView::of(&session))
}

#[derive(Debug, Default, Deserialize)]
struct NewGameRequest {
    vertices: Option<usize>,
    edge_probability: Option<f64>,
}

/// POST /api/game - start a new game (vertex count is raised to at least 3,
/// more than 500 is rejected).
async fn new_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<GameView>, ApiError> {
    if let Some(p) = req.edge_probability
        && !(0.0..=1.0).contains(&p)
    {
        return Err(unprocessable(format!(
            "edge_probability must be within [0, 1], got {p}"
        )));
    }
    if let Some(n) = req.vertices {
        check_vertex_limit(n).map_err(unprocessable)?;
    }
    let mut session = state.session.lock().await;
    session.new_game(req.vertices, req.edge_probability);
    info!(
        vertices = session.state().original.vertex_count(),
        "game started via api"
    );
    state.publish(GameEvent::GameStarted);
    Ok(Json(GameView::of(&session)))
}

#[derive(Debug, Deserialize)]
struct PartitionsRequest {
    partitions: [String; PARTITION_COUNT],
}

#[derive(Debug, Serialize, Deserialize)]
struct PartitionsView {
    partitions: [Vec<usize>; PARTITION_COUNT],
}

/// PUT /api/partitions - replace all three partitions from free text.
///
/// Unreadable entries are dropped, never rejected.
async fn put_partitions(
    State(state): State<AppState>,
    Json(req): Json<PartitionsRequest>,
) -> Json<PartitionsView> {
    let partitions = Partitions::parse(&req.partitions);
    let mut session = state.session.lock().await;
    session.set_partitions(partitions);
    state.publish(GameEvent::PartitionsChanged);
    Json(PartitionsView {
        partitions: session.partitions().groups().clone(),
    })
}

#[derive(Debug, Deserialize)]
struct FlipRequest {
    a: usize,
    b: usize,
}

#[derive(Debug, Deserialize)]
struct FlipWithinRequest {
    partition: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlipResponse {
    outcome: FlipOutcome,
    game: GameView,
}

/// POST /api/flip - flip edges between two different partitions.
async fn flip(
    State(state): State<AppState>,
    Json(req): Json<FlipRequest>,
) -> Result<Json<FlipResponse>, ApiError> {
    let selection = FlipSelection::Between(partition_arg(req.a)?, partition_arg(req.b)?);
    apply_flip(&state, selection).await
}

/// POST /api/flip-within - flip edges inside one partition.
async fn flip_within(
    State(state): State<AppState>,
    Json(req): Json<FlipWithinRequest>,
) -> Result<Json<FlipResponse>, ApiError> {
    let selection = FlipSelection::Within(partition_arg(req.partition)?);
    apply_flip(&state, selection).await
}

async fn apply_flip(
    state: &AppState,
    selection: FlipSelection,
) -> Result<Json<FlipResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let outcome = session
        .flip(selection)
        .map_err(|err| unprocessable(err.to_string()))?;
    if let FlipOutcome::Applied { removed, added } = &outcome {
        state.publish(GameEvent::EdgesFlipped {
            removed: removed.len(),
            added: added.len(),
        });
    }
    Ok(Json(FlipResponse {
        outcome,
        game: GameView::of(&session),
    }))
}

fn partition_arg(index: usize) -> Result<PartitionIndex, ApiError> {
    PartitionIndex::new(index).ok_or_else(|| {
        unprocessable(format!(
            "partition index {index} out of range 0..{PARTITION_COUNT}"
        ))
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct TurnResponse {
    outcome: TurnOutcome,
    game: GameView,
}

/// POST /api/done - end the flip phase and advance the runner.
async fn done(State(state): State<AppState>) -> Json<TurnResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.done_flipping();
    if let Some(event) = GameEvent::from_turn(outcome) {
        state.publish(event);
    }
    Json(TurnResponse {
        outcome,
        game: GameView::of(&session),
    })
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Snapshot {
    Original,
    Previous,
    #[default]
    Current,
}

#[derive(Debug, Default, Deserialize)]
struct VertexQuery {
    #[serde(default)]
    snapshot: Snapshot,
}

#[derive(Debug, Serialize, Deserialize)]
struct VertexView {
    vertex: usize,
    snapshot: Snapshot,
    degree: usize,
    neighbors: Vec<usize>,
}

/// GET /api/vertices/:v?snapshot=current - degree and neighbors of a vertex.
async fn get_vertex(
    State(state): State<AppState>,
    Path(vertex): Path<usize>,
    Query(query): Query<VertexQuery>,
) -> Json<VertexView> {
    let session = state.session.lock().await;
    let game = session.state();
    let graph = match query.snapshot {
        Snapshot::Original => &game.original,
        Snapshot::Previous => &game.previous,
        Snapshot::Current => &game.current,
    };
    Json(VertexView {
        vertex,
        snapshot: query.snapshot,
        degree: degree_of(graph, vertex),
        neighbors: neighbors_of(graph, vertex).into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipper::io::config::GameConfig;

    /// Path 0-1-2 with the runner at 0.
    fn path_state() -> AppState {
        let graph = Graph::from_edges(3, [(0, 1), (1, 2)]);
        let game = GameState::from_graph(graph, 0).expect("game");
        AppState::new(Session::with_state(GameConfig::default(), game))
    }

    fn partitions_request(texts: [&str; 3]) -> Json<PartitionsRequest> {
        Json(PartitionsRequest {
            partitions: texts.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn partitions_are_parsed_leniently() {
        let state = path_state();
        let Json(view) =
            put_partitions(State(state.clone()), partitions_request(["0, x,2", "", "1a"])).await;
        assert_eq!(view.partitions, [vec![0, 2], vec![], vec![1]]);
    }

    #[tokio::test]
    async fn same_partition_flip_is_unprocessable_and_changes_nothing() {
        let state = path_state();
        let before = state.session.lock().await.state().clone();
        let err = flip(State(state.clone()), Json(FlipRequest { a: 1, b: 1 }))
            .await
            .expect_err("rejected");
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.1.error.contains("two different partitions"));
        assert_eq!(state.session.lock().await.state(), &before);
    }

    #[tokio::test]
    async fn out_of_range_partition_is_unprocessable() {
        let state = path_state();
        let err = flip_within(State(state), Json(FlipWithinRequest { partition: 3 }))
            .await
            .expect_err("rejected");
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn flip_then_done_isolates_runner_and_broadcasts() {
        let state = path_state();
        let mut rx = state.event_tx.subscribe();
        put_partitions(State(state.clone()), partitions_request(["1", "0,2", ""])).await;

        let Json(flipped) = flip(State(state.clone()), Json(FlipRequest { a: 0, b: 1 }))
            .await
            .expect("flip");
        assert_eq!(flipped.game.current.edge_count(), 0);
        assert_eq!(flipped.game.original.edge_count(), 2);

        let Json(turn) = done(State(state.clone())).await;
        assert_eq!(turn.outcome, TurnOutcome::Isolated { from: 0, to: 1 });
        assert!(turn.game.winner);
        assert_eq!(turn.game.phase, Phase::GameOver);

        let Json(again) = done(State(state.clone())).await;
        assert_eq!(again.outcome, TurnOutcome::Ignored);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                GameEvent::PartitionsChanged,
                GameEvent::EdgesFlipped {
                    removed: 2,
                    added: 0
                },
                GameEvent::RunnerIsolated { from: 0, to: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn vertex_query_reads_requested_snapshot() {
        let state = path_state();
        put_partitions(State(state.clone()), partitions_request(["1", "0,2", ""])).await;
        flip(State(state.clone()), Json(FlipRequest { a: 0, b: 1 }))
            .await
            .expect("flip");

        let Json(current) = get_vertex(
            State(state.clone()),
            Path(1),
            Query(VertexQuery::default()),
        )
        .await;
        assert_eq!(current.degree, 0);

        let Json(original) = get_vertex(
            State(state),
            Path(1),
            Query(VertexQuery {
                snapshot: Snapshot::Original,
            }),
        )
        .await;
        assert_eq!(original.degree, 2);
        assert_eq!(original.neighbors, vec![0, 2]);
    }

    #[tokio::test]
    async fn new_game_validates_probability_and_clamps_vertices() {
        let state = path_state();
        let err = new_game(
            State(state.clone()),
            Json(NewGameRequest {
                vertices: None,
                edge_probability: Some(1.5),
            }),
        )
        .await
        .expect_err("rejected");
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);

        let Json(view) = new_game(
            State(state),
            Json(NewGameRequest {
                vertices: Some(1),
                edge_probability: Some(1.0),
            }),
        )
        .await
        .expect("new game");
        assert_eq!(view.original.vertex_count(), 3);
        assert_eq!(view.original.edge_count(), 3);
        assert_eq!(view.turn, 0);
    }

    #[tokio::test]
    async fn new_game_rejects_oversized_vertex_count_and_keeps_game() {
        let state = path_state();
        let before = state.session.lock().await.state().clone();
        let err = new_game(
            State(state.clone()),
            Json(NewGameRequest {
                vertices: Some(1_000_000),
                edge_probability: Some(1.0),
            }),
        )
        .await
        .expect_err("rejected");
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.1.0.error.contains("at most 500"));
        assert_eq!(state.session.lock().await.state(), &before);
    }
}
