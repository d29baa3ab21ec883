//! Packed internal move encoding.
//!
//! A move description is a `u64` holding origin and destination squares, the
//! moving piece, the captured piece, the promotion piece and special-move
//! flags. It is the currency of the rules engine; coordinate text such as
//! `e7e8q` is converted at the boundary by `utils::long_algebraic`.

use crate::game_state::chess_types::{PieceKind, Square};

const FROM_SHIFT: u64 = 0;
const TO_SHIFT: u64 = 6;
const MOVED_PIECE_SHIFT: u64 = 12;
const CAPTURED_PIECE_SHIFT: u64 = 15;
const PROMOTION_PIECE_SHIFT: u64 = 18;

const SQUARE_MASK: u64 = 0x3F;
const PIECE_MASK: u64 = 0x7;
pub const NO_PIECE_CODE: u64 = 0x7;

pub const FLAG_CAPTURE: u64 = 1u64 << 21;
pub const FLAG_DOUBLE_PAWN_PUSH: u64 = 1u64 << 22;
pub const FLAG_EN_PASSANT: u64 = 1u64 << 23;
pub const FLAG_CASTLING: u64 = 1u64 << 24;

#[inline]
pub fn pack_move_description(
    from: Square,
    to: Square,
    moved_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    promotion_piece: Option<PieceKind>,
    flags: u64,
) -> u64 {
    (u64::from(from) & SQUARE_MASK) << FROM_SHIFT
        | (u64::from(to) & SQUARE_MASK) << TO_SHIFT
        | piece_code(Some(moved_piece)) << MOVED_PIECE_SHIFT
        | piece_code(captured_piece) << CAPTURED_PIECE_SHIFT
        | piece_code(promotion_piece) << PROMOTION_PIECE_SHIFT
        | flags
}

#[inline]
pub fn move_from(move_description: u64) -> Square {
    ((move_description >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub fn move_to(move_description: u64) -> Square {
    ((move_description >> TO_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub fn move_moved_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> MOVED_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn move_captured_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn move_promotion_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn move_has_flag(move_description: u64, flag: u64) -> bool {
    move_description & flag != 0
}

#[inline]
fn piece_code(piece_kind: Option<PieceKind>) -> u64 {
    piece_kind.map_or(NO_PIECE_CODE, |kind| kind.index() as u64)
}

#[inline]
pub fn piece_kind_from_code(code: u64) -> Option<PieceKind> {
    PieceKind::ALL.get(code as usize).copied()
}
