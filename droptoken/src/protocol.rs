use serde::{Deserialize, Serialize};

use crate::game::{Game, GameStatus, Move};

fn default_win_length() -> usize {
    4
}

/// Request to create a new game.
///
/// The player list is the turn order. `winLength` can be omitted for
/// standard connect-four rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub players: Vec<String>,
    pub rows: usize,
    pub columns: usize,
    #[serde(default = "default_win_length")]
    pub win_length: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListGamesResponse {
    pub games: Vec<String>,
}

/// The externally visible state of one game.
///
/// The `winner` key is only present once the game is done, and is
/// `null` then for a draw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub players: Vec<String>,
    pub state: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Option<String>>,
}

impl From<&Game> for GameStateResponse {
    fn from(game: &Game) -> Self {
        let state = game.status();
        Self {
            players: game.players().iter().map(|p| p.id().to_string()).collect(),
            state,
            winner: match state {
                GameStatus::Done => Some(game.winner().map(|p| p.id().to_string())),
                GameStatus::InProgress => None,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListMovesResponse {
    pub moves: Vec<Move>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayRequest {
    pub column: usize,
}

/// Points at the history entry a successful play created, in the form
/// `{gameId}/moves/{moveNumber}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayResponse {
    pub r#move: String,
}
