//! Result vocabulary for a position.
//!
//! A `GameResult` is a pure function of a `GameState` and is never stored on
//! the state itself; see `move_generation::game_outcome::game_result`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    InProgress,
    /// The side to move is checkmated.
    Checkmate,
    /// The side to move has no legal moves and is not in check.
    Stalemate,
    Draw(DrawReason),
}

impl GameResult {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::InsufficientMaterial => "insufficient material",
        })
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => f.write_str("in progress"),
            GameResult::Checkmate => f.write_str("checkmate"),
            GameResult::Stalemate => f.write_str("stalemate"),
            GameResult::Draw(reason) => write!(f, "draw ({reason})"),
        }
    }
}
