/// The error type for every fallible operation in this crate.
///
/// All variants are deterministic rule violations, reported to the
/// immediate caller; nothing is retried or swallowed. A boundary layer
/// can map [`Error::kind`] to a transport status code exhaustively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    InvalidDimension {
        rows: usize,
        columns: usize,
        win_length: usize,
    },
    InvalidColumn {
        column: usize,
        columns: usize,
    },
    InvalidRow {
        row: usize,
        rows: usize,
    },
    ColumnFull {
        column: usize,
    },
    InvalidName,
    InvalidPlayers {
        count: usize,
    },
    OutOfTurn {
        player_id: String,
    },
    InactivePlayer {
        player_id: String,
    },
    GameOver,
    UnknownPlayer {
        player_id: String,
    },
    GameNotFound {
        game_id: String,
    },
    PlayerNotFound {
        player_id: String,
    },
    InvalidRange {
        start: usize,
        until: usize,
    },
    TokensExhausted,
}

impl Error {
    /// A machine-readable name for this failure.
    ///
    /// Both not-found variants share the `NotFound` kind; everything
    /// else maps one-to-one.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidDimension { .. } => "InvalidDimension",
            Error::InvalidColumn { .. } => "InvalidColumn",
            Error::InvalidRow { .. } => "InvalidRow",
            Error::ColumnFull { .. } => "ColumnFull",
            Error::InvalidName => "InvalidName",
            Error::InvalidPlayers { .. } => "InvalidPlayers",
            Error::OutOfTurn { .. } => "OutOfTurn",
            Error::InactivePlayer { .. } => "InactivePlayer",
            Error::GameOver => "GameOver",
            Error::UnknownPlayer { .. } => "UnknownPlayer",
            Error::GameNotFound { .. } | Error::PlayerNotFound { .. } => "NotFound",
            Error::InvalidRange { .. } => "InvalidRange",
            Error::TokensExhausted => "TokensExhausted",
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidDimension {
                rows,
                columns,
                win_length,
            } => write!(
                f,
                "A {}x{} board with win length {} is not a valid board",
                rows, columns, win_length
            ),
            Error::InvalidColumn { column, columns } => write!(
                f,
                "Column {} doesn't exist, the board has {} columns",
                column, columns
            ),
            Error::InvalidRow { row, rows } => {
                write!(f, "Row {} doesn't exist, the board has {} rows", row, rows)
            }
            Error::ColumnFull { column } => {
                write!(f, "Can't play in column {}. That column is full", column)
            }
            Error::InvalidName => write!(f, "Player names must not be empty"),
            Error::InvalidPlayers { count } => write!(
                f,
                "A game needs at least two distinct players, got {}",
                count
            ),
            Error::OutOfTurn { player_id } => {
                write!(f, "It is not {}'s turn", player_id)
            }
            Error::InactivePlayer { player_id } => {
                write!(f, "{} has already quit this game", player_id)
            }
            Error::GameOver => write!(f, "The game is already over"),
            Error::UnknownPlayer { player_id } => {
                write!(f, "{} never joined this game", player_id)
            }
            Error::GameNotFound { game_id } => write!(f, "Game {} does not exist", game_id),
            Error::PlayerNotFound { player_id } => {
                write!(f, "Player \"{}\" does not exist", player_id)
            }
            Error::InvalidRange { start, until } => write!(
                f,
                "[{}, {}) is not a valid range of moves",
                start, until
            ),
            Error::TokensExhausted => write!(f, "No unassigned player tokens remain"),
        }
    }
}
