use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use droptoken::{
    CreateGameRequest, CreateGameResponse, GameStateResponse, ListGamesResponse,
    ListMovesResponse, Move, PlayRequest, PlayResponse, Store,
};

use crate::error::ApiError;

/// Shared handler state: the one registry, behind a reader-writer lock.
///
/// Mutating operations (create/play/quit) take the write lock, which
/// serializes them and preserves the per-game turn-order and
/// history-append invariants; lookups share the read lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/drop_token", get(list_games).post(create_game))
        .route("/drop_token/:game_id", get(get_game))
        .route("/drop_token/:game_id/moves", get(list_moves))
        .route("/drop_token/:game_id/moves/:move_number", get(get_move))
        .route(
            "/drop_token/:game_id/:player_id",
            axum::routing::post(play_move).delete(quit),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

async fn list_games(State(state): State<AppState>) -> Json<ListGamesResponse> {
    let store = state.store.read().await;
    Json(ListGamesResponse {
        games: store.list_games(),
    })
}

async fn create_game(
    State(state): State<AppState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let mut store = state.store.write().await;
    let game = store.create_game(&req.players, req.rows, req.columns, req.win_length)?;
    Ok(Json(CreateGameResponse {
        game_id: game.id().to_string(),
    }))
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let store = state.store.read().await;
    let game = store.get_game(&game_id)?;
    Ok(Json(GameStateResponse::from(game)))
}

#[derive(Debug, Deserialize)]
struct MovesQuery {
    start: Option<i64>,
    until: Option<i64>,
}

async fn list_moves(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Query(query): Query<MovesQuery>,
) -> Result<Json<ListMovesResponse>, ApiError> {
    let (start, until) = range_bounds(query)?;
    let store = state.store.read().await;
    let game = store.get_game(&game_id)?;
    let moves = game.history_range(start, until)?.to_vec();
    Ok(Json(ListMovesResponse { moves }))
}

/// History indices are unsigned in the core; negative query bounds are
/// rejected here as an invalid range.
fn range_bounds(query: MovesQuery) -> Result<(usize, Option<usize>), ApiError> {
    if query.start.is_some_and(|s| s < 0) || query.until.is_some_and(|u| u < 0) {
        return Err(ApiError::bad_request(
            "InvalidRange",
            "start and until must be non-negative",
        ));
    }
    Ok((
        query.start.unwrap_or(0) as usize,
        query.until.map(|u| u as usize),
    ))
}

async fn get_move(
    State(state): State<AppState>,
    Path((game_id, move_number)): Path<(String, usize)>,
) -> Result<Json<Move>, ApiError> {
    let store = state.store.read().await;
    let game = store.get_game(&game_id)?;
    let entry = game
        .history()
        .get(move_number)
        .ok_or_else(|| ApiError::not_found(format!("Move {} does not exist", move_number)))?;
    Ok(Json(entry.clone()))
}

async fn play_move(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, String)>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<PlayResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let mut store = state.store.write().await;
    // Players the registry has never seen get a 404, like unknown games.
    store.get_player(&player_id)?;
    let game = store.get_game_mut(&game_id)?;
    let move_number = game.play(&player_id, req.column)?;
    Ok(Json(PlayResponse {
        r#move: format!("{}/moves/{}", game_id, move_number),
    }))
}

async fn quit(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.get_player(&player_id)?;
    let game = store.get_game_mut(&game_id)?;
    game.quit(&player_id)?;
    Ok(StatusCode::ACCEPTED)
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request("MalformedRequest", rejection.body_text())
}
