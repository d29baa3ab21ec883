//! Unchecked board transition.
//!
//! `apply_move` plays a packed move on a copy of the position without
//! consulting the legal-move set and without touching the game chain. The
//! generator uses it to simulate candidates; the executor uses it after
//! legality has been established.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_lane_for_king_move, castling_rights_touched_by};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::piece_on_square_for_color;
use crate::moves::move_descriptions::{
    move_from, move_has_flag, move_promotion_piece, move_to, pack_move_description, FLAG_CAPTURE,
    FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

pub fn apply_move(game_state: &GameState, move_description: u64) -> ChessResult<GameState> {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let moved_piece = piece_on_square_for_color(game_state, moving_color, from).ok_or_else(|| {
        ChessError::Internal(format!("no {moving_color} piece on from-square {from}"))
    })?;

    let mut next = game_state.position_snapshot();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    let is_capture = if move_has_flag(move_description, FLAG_EN_PASSANT) {
        let capture_sq = match moving_color {
            Color::White => to.checked_sub(8),
            Color::Black => to.checked_add(8).filter(|sq| *sq < 64),
        }
        .ok_or_else(|| ChessError::Internal(format!("invalid en-passant target {to}")))?;
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
        true
    } else {
        let occupied_by_enemy = game_state.occupancy_by_color[enemy_color.index()] & to_mask != 0;
        if occupied_by_enemy {
            for bb in next.pieces[enemy_color.index()].iter_mut() {
                *bb &= !to_mask;
            }
        }
        occupied_by_enemy || move_has_flag(move_description, FLAG_CAPTURE)
    };

    let placed_piece = move_promotion_piece(move_description).unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed_piece.index()] |= to_mask;

    if moved_piece == PieceKind::King && move_has_flag(move_description, FLAG_CASTLING) {
        let lane = castling_lane_for_king_move(from, to)
            .ok_or_else(|| ChessError::Internal(format!("no castling lane for {from}->{to}")))?;
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks &= !(1u64 << lane.rook_from);
        *rooks |= 1u64 << lane.rook_to;
    }

    // Leaving or landing on a king or rook home square clears its rights,
    // which covers king moves, rook moves and rook captures.
    next.castling_rights &= !(castling_rights_touched_by(from) | castling_rights_touched_by(to));

    next.en_passant_square = if move_has_flag(move_description, FLAG_DOUBLE_PAWN_PUSH) {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    Ok(next)
}

#[inline]
pub fn build_move(
    from: Square,
    to: Square,
    moved_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    promotion_piece: Option<PieceKind>,
    flags: u64,
) -> u64 {
    pack_move_description(from, to, moved_piece, captured_piece, promotion_piece, flags)
}

#[cfg(test)]
mod tests {
    use super::{apply_move, build_move};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn double_push_sets_en_passant_and_flips_side() {
        let game = GameState::new_game();
        let mv = build_move(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.en_passant_square, Some(20));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.piece_at(28), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(next.piece_at(12), None);
        assert_eq!(next.fullmove_number, 1);
        assert!(next.move_history.is_empty());
        // The source is untouched.
        assert_eq!(game.piece_at(12), Some(Piece::new(PieceKind::Pawn, Color::White)));
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let game = state("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = build_move(36, 43, PieceKind::Pawn, Some(PieceKind::Pawn), None, FLAG_CAPTURE | FLAG_EN_PASSANT);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.piece_at(35), None);
        assert_eq!(next.piece_at(43), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(next.occupancy_by_color[Color::Black.index()].count_ones(), 1);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let game = state("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10");
        let mv = build_move(60, 58, PieceKind::King, None, None, FLAG_CASTLING);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.piece_at(59), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(next.piece_at(56), None);
        assert_eq!(next.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
        assert_eq!(next.halfmove_clock, 4);
        assert_eq!(next.fullmove_number, 11);
    }

    #[test]
    fn capturing_a_home_rook_clears_the_victims_right() {
        let game = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = build_move(0, 56, PieceKind::Rook, Some(PieceKind::Rook), None, FLAG_CAPTURE);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let game = state("4k3/P7/8/8/8/8/8/4K3 w - - 5 30");
        let mv = build_move(48, 56, PieceKind::Pawn, None, Some(PieceKind::Knight), 0);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.piece_at(56), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(next.pieces[Color::White.index()][PieceKind::Pawn.index()], 0);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn moving_from_an_empty_square_is_an_internal_error() {
        let mv = build_move(27, 35, PieceKind::Queen, None, None, 0);
        assert!(matches!(
            apply_move(&GameState::new_game(), mv),
            Err(ChessError::Internal(_))
        ));
    }
}
