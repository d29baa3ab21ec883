//! Square conversions for coordinate text (`e4`).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert coordinate text (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to coordinate text.
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if square > 63 {
        return Err(ChessError::InvalidSquare(square.to_string()));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}

/// Like `square_to_algebraic` for indices already known to be on the board.
#[inline]
pub(crate) fn square_name(square: Square) -> String {
    let square = square & 63;
    format!("{}{}", char::from(b'a' + square % 8), char::from(b'1' + square / 8))
}
