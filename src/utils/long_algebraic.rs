//! Coordinate move text (`e2e4`, `e7e8q`) at the engine boundary.
//!
//! Text is parsed into a `UciMove` without looking at any position. Whether a
//! `UciMove` is playable is decided by membership in the legal-move set of a
//! concrete state (`legal_move_generator::find_legal_move`), never by guessing
//! flags from the board here.

use std::fmt;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::utils::algebraic::{algebraic_to_square, square_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl UciMove {
    /// Whether this text names the packed move `move_description`.
    #[inline]
    pub fn matches(&self, move_description: u64) -> bool {
        move_from(move_description) == self.from
            && move_to(move_description) == self.to
            && move_promotion_piece(move_description) == self.promotion
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_name(self.from))?;
        f.write_str(&square_name(self.to))?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_letter())?;
        }
        Ok(())
    }
}

/// Parses 4 or 5 character coordinate text. The optional fifth character
/// must be a lowercase promotion letter.
pub fn parse_uci_move(text: &str) -> ChessResult<UciMove> {
    if !text.is_ascii() || !(text.len() == 4 || text.len() == 5) {
        return Err(ChessError::IllegalMove(format!(
            "malformed move text '{text}'"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(other) => {
            return Err(ChessError::IllegalMove(format!(
                "invalid promotion piece '{}' in '{text}'",
                char::from(*other)
            )))
        }
    };

    Ok(UciMove {
        from,
        to,
        promotion,
    })
}

/// Coordinate text of a packed move.
pub fn move_description_to_long_algebraic(move_description: u64) -> String {
    UciMove {
        from: move_from(move_description),
        to: move_to(move_description),
        promotion: move_promotion_piece(move_description),
    }
    .to_string()
}
