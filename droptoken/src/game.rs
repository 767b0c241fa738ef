use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::errors::Error;
use crate::player::Player;

/// Derived game state. `Done` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

/// One entry in a game's history: a token dropped into a column, or a
/// player leaving the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Move {
    #[serde(rename = "MOVE")]
    Drop { player: String, column: usize },
    #[serde(rename = "QUIT")]
    Quit { player: String },
}

/// A single drop-token game: an owned [`Board`], the ordered players,
/// and the turn/quit bookkeeping around them.
///
/// Turn order is the player list order, fixed at creation. A player who
/// quits stays in the list but is skipped when rotating turns. History
/// is append-only; every successful [`Game::play`] and first-time
/// [`Game::quit`] adds exactly one entry.
#[derive(Clone, Debug)]
pub struct Game {
    id: String,
    players: Vec<Player>,
    active: Vec<bool>,
    board: Board,
    turn: usize,
    history: Vec<Move>,
    winner: Option<usize>,
}

impl Game {
    /// Creates a game with the given players, in turn order.
    ///
    /// At least two distinct players are required.
    pub fn new(
        id: impl Into<String>,
        players: Vec<Player>,
        rows: usize,
        columns: usize,
        win_length: usize,
    ) -> Result<Self, Error> {
        let distinct: HashSet<&str> = players.iter().map(Player::id).collect();
        if players.len() < 2 || distinct.len() != players.len() {
            return Err(Error::InvalidPlayers {
                count: players.len(),
            });
        }
        let board = Board::new(rows, columns, win_length)?;
        let active = vec![true; players.len()];
        Ok(Self {
            id: id.into(),
            players,
            active,
            board,
            turn: 0,
            history: Vec::new(),
            winner: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|idx| &self.players[idx])
    }

    /// The player whose move is next. Meaningless once the game is
    /// done, so `None` is returned then.
    pub fn current_player(&self) -> Option<&Player> {
        match self.status() {
            GameStatus::InProgress => Some(&self.players[self.turn]),
            GameStatus::Done => None,
        }
    }

    /// Done iff there is a winner, the board is full, or fewer than two
    /// players are still active.
    pub fn status(&self) -> GameStatus {
        if self.winner.is_some() || self.board.is_full() || self.active_count() < 2 {
            GameStatus::Done
        } else {
            GameStatus::InProgress
        }
    }

    fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Drops the player's token into `column`, returning the index of
    /// the resulting history entry.
    ///
    /// On any failure nothing is mutated: no cell changes, nothing is
    /// appended, the turn stays put.
    pub fn play(&mut self, player_id: &str, column: usize) -> Result<usize, Error> {
        if self.status() == GameStatus::Done {
            return Err(Error::GameOver);
        }
        if self.players[self.turn].id() != player_id {
            return Err(Error::OutOfTurn {
                player_id: player_id.to_string(),
            });
        }
        // Unreachable while turn rotation skips quit players.
        if !self.active[self.turn] {
            return Err(Error::InactivePlayer {
                player_id: player_id.to_string(),
            });
        }

        let token = self.players[self.turn].token();
        let row = self.board.play(column, token)?;
        if self.board.is_winning_move(row, column, token) {
            self.winner = Some(self.turn);
        }
        self.history.push(Move::Drop {
            player: player_id.to_string(),
            column,
        });
        self.advance_turn();
        Ok(self.history.len() - 1)
    }

    /// Marks the player inactive. Quitting again later is a no-op.
    ///
    /// If exactly one active player remains afterwards, that player
    /// wins. If the quitting player held the turn, it rotates onward.
    pub fn quit(&mut self, player_id: &str) -> Result<(), Error> {
        if self.status() == GameStatus::Done {
            return Err(Error::GameOver);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| Error::UnknownPlayer {
                player_id: player_id.to_string(),
            })?;
        if !self.active[idx] {
            return Ok(());
        }

        self.active[idx] = false;
        self.history.push(Move::Quit {
            player: player_id.to_string(),
        });
        if self.active_count() == 1 {
            self.winner = self.active.iter().position(|&a| a);
        }
        if idx == self.turn {
            self.advance_turn();
        }
        Ok(())
    }

    /// Rotates to the next active player after `turn`, scanning one
    /// full cycle. With no active player left the index stays put; the
    /// game is terminal then and the index is moot.
    fn advance_turn(&mut self) {
        let n = self.players.len();
        for offset in 1..=n {
            let idx = (self.turn + offset) % n;
            if self.active[idx] {
                self.turn = idx;
                return;
            }
        }
    }

    /// The full move/quit history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The history entries in `[start, until)`. An omitted `until`
    /// means "through the end"; a given one must be greater than
    /// `start`. Bounds past the end clamp rather than fail.
    pub fn history_range(&self, start: usize, until: Option<usize>) -> Result<&[Move], Error> {
        if let Some(until) = until {
            if until <= start {
                return Err(Error::InvalidRange { start, until });
            }
        }
        let end = until.unwrap_or(self.history.len()).min(self.history.len());
        Ok(&self.history[start.min(end)..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, token: char) -> Player {
        Player::new(id, id, token).unwrap()
    }

    fn two_player_game(rows: usize, columns: usize) -> Game {
        Game::new(
            "g1",
            vec![player("player1", '1'), player("player2", '2')],
            rows,
            columns,
            4,
        )
        .unwrap()
    }

    #[test]
    fn moves_must_alternate() {
        let mut g = two_player_game(4, 4);

        assert!(matches!(g.play("player2", 0), Err(Error::OutOfTurn { .. })));
        assert_eq!(g.play("player1", 0).unwrap(), 0);
        assert!(matches!(g.play("player1", 0), Err(Error::OutOfTurn { .. })));
        assert_eq!(g.play("player2", 0).unwrap(), 1);
    }

    #[test]
    fn fewer_than_two_players_is_invalid() {
        let err = Game::new("g", vec![player("solo", 's')], 4, 4, 4).unwrap_err();
        assert_eq!(err, Error::InvalidPlayers { count: 1 });

        let err = Game::new(
            "g",
            vec![player("dup", 'd'), player("dup", 'e')],
            4,
            4,
            4,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidPlayers { count: 2 });
    }

    #[test]
    fn quit_removes_player_from_rotation() {
        let mut g = Game::new(
            "g",
            vec![player("p", '1'), player("q", '2'), player("r", '3')],
            4,
            4,
            4,
        )
        .unwrap();

        assert_eq!(g.status(), GameStatus::InProgress);
        g.quit("p").unwrap();

        // A quit player is never the current player again.
        assert!(matches!(g.play("p", 0), Err(Error::OutOfTurn { .. })));

        g.play("q", 1).unwrap();
        g.play("r", 1).unwrap();

        // Only one player left after the second quit, so they win.
        g.quit("q").unwrap();
        assert_eq!(g.status(), GameStatus::Done);
        assert_eq!(g.winner().unwrap().id(), "r");
    }

    #[test]
    fn repeated_quit_is_a_no_op() {
        let mut g = Game::new(
            "g",
            vec![player("p", '1'), player("q", '2'), player("r", '3')],
            4,
            4,
            4,
        )
        .unwrap();
        g.quit("p").unwrap();
        g.quit("p").unwrap();
        assert_eq!(g.history().len(), 1);
        assert_eq!(g.status(), GameStatus::InProgress);
    }

    #[test]
    fn quit_by_stranger_fails() {
        let mut g = two_player_game(4, 4);
        assert!(matches!(
            g.quit("monkey"),
            Err(Error::UnknownPlayer { .. })
        ));
    }

    #[test]
    fn four_in_a_column_wins() {
        let mut g = two_player_game(9, 9);

        for _ in 0..3 {
            g.play("player1", 0).unwrap();
            g.play("player2", 1).unwrap();
        }
        assert_eq!(g.status(), GameStatus::InProgress);

        g.play("player1", 0).unwrap();
        assert_eq!(g.status(), GameStatus::Done);
        assert_eq!(g.winner().unwrap().id(), "player1");

        // Nobody can play once the game is over.
        assert_eq!(g.play("player2", 1), Err(Error::GameOver));
        assert_eq!(g.play("player1", 1), Err(Error::GameOver));
    }

    #[test]
    fn full_board_without_winner_is_a_draw() {
        let mut g = Game::new(
            "g",
            vec![player("jane", 'j'), player("henry", 'h')],
            4,
            2,
            4,
        )
        .unwrap();

        for i in 0..4 {
            g.play("jane", i % 2).unwrap();
            g.play("henry", i % 2).unwrap();
        }

        assert_eq!(g.status(), GameStatus::Done);
        assert!(g.winner().is_none());
    }

    #[test]
    fn history_records_moves_and_quits_in_order() {
        let mut g = Game::new(
            "g",
            vec![player("foo", 'f'), player("bar", 'b'), player("bat", 't')],
            7,
            7,
            4,
        )
        .unwrap();

        g.play("foo", 0).unwrap();
        g.play("bar", 1).unwrap();
        g.quit("bat").unwrap();

        assert_eq!(
            g.history(),
            &[
                Move::Drop {
                    player: "foo".to_string(),
                    column: 0
                },
                Move::Drop {
                    player: "bar".to_string(),
                    column: 1
                },
                Move::Quit {
                    player: "bat".to_string()
                },
            ]
        );
        assert_eq!(g.status(), GameStatus::InProgress);

        for _ in 0..2 {
            g.play("foo", 0).unwrap();
            g.play("bar", 1).unwrap();
        }
        assert_eq!(g.history().len(), 7);

        g.quit("bar").unwrap();
        assert_eq!(g.status(), GameStatus::Done);
        assert_eq!(g.winner().unwrap().id(), "foo");
    }

    #[test]
    fn history_range_bounds() {
        let mut g = Game::new(
            "g",
            vec![player("foo", 'f'), player("bar", 'b'), player("bat", 't')],
            7,
            7,
            4,
        )
        .unwrap();
        g.play("foo", 0).unwrap();
        g.play("bar", 1).unwrap();
        g.quit("bat").unwrap();
        for _ in 0..2 {
            g.play("foo", 0).unwrap();
            g.play("bar", 1).unwrap();
        }
        assert_eq!(g.history().len(), 7);

        assert_eq!(g.history_range(0, Some(4)).unwrap().len(), 4);
        assert_eq!(g.history_range(0, None).unwrap().len(), 7);
        assert_eq!(g.history_range(5, None).unwrap().len(), 2);
        // Past-the-end bounds clamp.
        assert_eq!(g.history_range(0, Some(100)).unwrap().len(), 7);
        assert_eq!(g.history_range(100, None).unwrap().len(), 0);

        assert_eq!(
            g.history_range(5, Some(5)),
            Err(Error::InvalidRange { start: 5, until: 5 })
        );
        assert_eq!(
            g.history_range(5, Some(3)),
            Err(Error::InvalidRange { start: 5, until: 3 })
        );
    }

    #[test]
    fn quit_after_game_over_fails() {
        let mut g = two_player_game(9, 9);
        for _ in 0..3 {
            g.play("player1", 0).unwrap();
            g.play("player2", 1).unwrap();
        }
        g.play("player1", 0).unwrap();
        assert_eq!(g.quit("player2"), Err(Error::GameOver));
    }

    #[test]
    fn failed_play_leaves_state_untouched() {
        let mut g = two_player_game(2, 2);
        g.play("player1", 0).unwrap();
        g.play("player2", 0).unwrap();

        assert_eq!(
            g.play("player1", 0),
            Err(Error::ColumnFull { column: 0 })
        );
        assert_eq!(g.history().len(), 2);
        assert_eq!(g.current_player().unwrap().id(), "player1");
    }
}
