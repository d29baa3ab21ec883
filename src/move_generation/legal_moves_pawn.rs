//! Pawn pushes, double pushes, captures, en passant and promotions.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_shared::{enemy_piece_on, own_pieces};
use crate::moves::leaper_attacks::pawn_attacks;
use crate::moves::move_descriptions::{FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, origin_mask: u64, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;

    let mut pawns = own_pieces(game_state, PieceKind::Pawn, origin_mask);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        // A pawn can never stand on its promotion rank, so the step stays on the board.
        let one_step = match side {
            Color::White => from + 8,
            Color::Black => from - 8,
        };

        if empty & (1u64 << one_step) != 0 {
            push_pawn_move(out, side, from, one_step, None, 0);

            if square_rank(from) == side.pawn_start_rank() {
                let two_step = match side {
                    Color::White => from + 16,
                    Color::Black => from - 16,
                };
                if empty & (1u64 << two_step) != 0 {
                    out.push(build_move(
                        from,
                        two_step,
                        PieceKind::Pawn,
                        None,
                        None,
                        FLAG_DOUBLE_PAWN_PUSH,
                    ));
                }
            }
        }

        let attacks = pawn_attacks(side, from);

        let mut captures = attacks & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            push_pawn_move(out, side, from, to, enemy_piece_on(game_state, to), FLAG_CAPTURE);
            captures &= captures - 1;
        }

        if let Some(ep) = game_state.en_passant_square {
            if attacks & (1u64 << ep) != 0 {
                out.push(build_move(
                    from,
                    ep,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

/// Pushes a single move, or all four promotions when `to` is the last rank.
fn push_pawn_move(
    out: &mut Vec<u64>,
    side: Color,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u64,
) {
    if square_rank(to) == side.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(build_move(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(build_move(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::*;

    fn pawn_moves(fen: &str) -> Vec<u64> {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&state, u64::MAX, &mut out);
        out
    }

    #[test]
    fn start_pawns_have_single_and_double_pushes() {
        let moves = pawn_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 16);
        assert_eq!(
            moves
                .iter()
                .filter(|mv| move_has_flag(**mv, FLAG_DOUBLE_PAWN_PUSH))
                .count(),
            8
        );
    }

    #[test]
    fn blocked_pawn_cannot_push_or_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn capture_promotion_emits_four_choices_each() {
        // b7 pawn can push to b8 or take a8/c8.
        let moves = pawn_moves("r1n1k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves.len(), 12);
        assert!(moves.iter().all(|mv| move_promotion_piece(*mv).is_some()));
        assert_eq!(
            moves
                .iter()
                .filter(|mv| move_has_flag(**mv, FLAG_CAPTURE))
                .count(),
            8
        );
    }

    #[test]
    fn en_passant_capture_is_generated_for_adjacent_pawn() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep: Vec<_> = moves
            .iter()
            .filter(|mv| move_has_flag(**mv, FLAG_EN_PASSANT))
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(move_to(*ep[0]), 43);
        assert_eq!(move_captured_piece(*ep[0]), Some(crate::game_state::chess_types::PieceKind::Pawn));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
        let targets: Vec<_> = moves.iter().map(|mv| move_to(*mv)).collect();
        assert_eq!(targets, vec![44, 36]);
    }
}
