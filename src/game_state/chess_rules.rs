//! Canonical chess-rule constants.
//!
//! Static rule-related literals: the standard starting position, the draw
//! thresholds and the fixed castling geometry shared by move generation and
//! move application.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Number of occurrences of the same position that draws the game.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// Dark squares (a1 is dark).
pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;

/// Fixed geometry of one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub empty_mask: u64,
    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub safe_squares: [Square; 3],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        empty_mask: (1 << 5) | (1 << 6),
        safe_squares: [4, 5, 6],
    },
    CastlingLane {
        color: Color::White,
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        empty_mask: (1 << 1) | (1 << 2) | (1 << 3),
        safe_squares: [4, 3, 2],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        empty_mask: (1 << 61) | (1 << 62),
        safe_squares: [60, 61, 62],
    },
    CastlingLane {
        color: Color::Black,
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        empty_mask: (1 << 57) | (1 << 58) | (1 << 59),
        safe_squares: [60, 59, 58],
    },
];

/// Castling rights lost when a piece leaves or arrives on `square`.
#[inline]
pub const fn castling_rights_touched_by(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

pub fn castling_lane_for_king_move(from: Square, to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.king_from == from && lane.king_to == to)
}
