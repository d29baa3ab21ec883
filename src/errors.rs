//! Error taxonomy shared by the rules engine, the executor, the serializer and
//! the bot host.
//!
//! Query-style functions in the rules engine never fail for well-formed input:
//! "no legal moves" is a terminal signal, not an error. Errors only surface at
//! the boundaries where untrusted input enters the system (move text, FEN text,
//! bot replies).

use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::game_state::game_result::GameResult;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Square index or coordinate text outside the board.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move is not a member of the legal-move set of the current state.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Malformed serialized state.
    #[error("invalid representation: {0}")]
    InvalidRepresentation(String),

    /// A bot returned an empty, malformed or illegal move, panicked, or ran
    /// past its time budget.
    #[error("bot '{bot}' violated the plugin protocol: {reason}")]
    PluginProtocolViolation { bot: String, reason: String },

    /// A move was attempted after the game reached a terminal result.
    #[error("game is already over: {0}")]
    GameOver(GameResult),

    /// A bot turn was requested for a color with no bot seated.
    #[error("no bot is seated for {0}")]
    SeatEmpty(Color),

    /// Corrupt state reached through an unchecked path.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChessError {
    pub fn violation(bot: &str, reason: impl Into<String>) -> Self {
        ChessError::PluginProtocolViolation {
            bot: bot.to_owned(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ChessError::PluginProtocolViolation { .. })
    }
}
