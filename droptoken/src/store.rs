use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::Error;
use crate::game::Game;
use crate::player::Player;

/// Symbols handed out when a player's preferred token is taken. The
/// scan runs in reverse so digits and rare letters go first, keeping
/// common letters free for players whose id starts with them.
const FALLBACK_TOKENS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// The in-memory registry of games and players.
///
/// This is the only mutable shared state in the crate: one `Store` is
/// constructed at process start and lives until process exit. Players
/// are created on first reference and never deleted; games and tokens
/// are never reclaimed, so ids and tokens are never reused.
///
/// Alternate implementations behind the same interface could be backed
/// by Redis or a relational database; this one is a process-local map.
#[derive(Debug)]
pub struct Store {
    games: HashMap<String, Game>,
    players: HashMap<String, Player>,
    tokens_in_use: HashSet<char>,
    rng: StdRng,
}

impl Store {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A store with a caller-supplied RNG, for deterministic game ids
    /// in tests.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            games: HashMap::new(),
            players: HashMap::new(),
            tokens_in_use: HashSet::new(),
            rng,
        }
    }

    /// Looks up a player, creating and registering one on first
    /// reference. The display name of a created player is its id.
    pub fn get_or_create_player(&mut self, player_id: &str) -> Result<Player, Error> {
        if let Some(player) = self.players.get(player_id) {
            return Ok(player.clone());
        }
        if player_id.is_empty() {
            return Err(Error::InvalidName);
        }
        let token = self.allocate_token(player_id)?;
        let player = Player::new(player_id, player_id, token)?;
        self.players.insert(player_id.to_string(), player.clone());
        Ok(player)
    }

    /// Prefer the first character of the player's id; otherwise hand
    /// out the first free symbol of the reverse fallback scan.
    fn allocate_token(&mut self, player_id: &str) -> Result<char, Error> {
        if let Some(proposed) = player_id.chars().next() {
            if self.tokens_in_use.insert(proposed) {
                return Ok(proposed);
            }
        }
        for candidate in FALLBACK_TOKENS.chars().rev() {
            if self.tokens_in_use.insert(candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::TokensExhausted)
    }

    /// A lookup that does not create: used where an unknown player is
    /// an error rather than a registration.
    pub fn get_player(&self, player_id: &str) -> Result<&Player, Error> {
        self.players.get(player_id).ok_or_else(|| Error::PlayerNotFound {
            player_id: player_id.to_string(),
        })
    }

    /// Creates a game for the given players (in turn order), resolving
    /// or registering each of them, and stores it under a fresh id.
    pub fn create_game(
        &mut self,
        player_ids: &[String],
        rows: usize,
        columns: usize,
        win_length: usize,
    ) -> Result<&Game, Error> {
        let mut players = Vec::with_capacity(player_ids.len());
        for player_id in player_ids {
            players.push(self.get_or_create_player(player_id)?);
        }
        let id = self.fresh_game_id();
        let game = Game::new(&id, players, rows, columns, win_length)?;
        Ok(self.games.entry(id).or_insert(game))
    }

    fn fresh_game_id(&mut self) -> String {
        loop {
            let id = format!("{:08x}", self.rng.gen::<u32>());
            if !self.games.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn get_game(&self, game_id: &str) -> Result<&Game, Error> {
        self.games.get(game_id).ok_or_else(|| Error::GameNotFound {
            game_id: game_id.to_string(),
        })
    }

    pub fn get_game_mut(&mut self, game_id: &str) -> Result<&mut Game, Error> {
        self.games.get_mut(game_id).ok_or_else(|| Error::GameNotFound {
            game_id: game_id.to_string(),
        })
    }

    /// All known game ids, in no particular order.
    pub fn list_games(&self) -> Vec<String> {
        self.games.keys().cloned().collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
