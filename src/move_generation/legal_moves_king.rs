use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{own_pieces, push_moves_to_targets};
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::move_descriptions::FLAG_CASTLING;

pub fn generate_king_moves(game_state: &GameState, origin_mask: u64, out: &mut Vec<u64>) {
    let king_bb = own_pieces(game_state, PieceKind::King, origin_mask);
    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as Square;
    let own_occ = game_state.occupancy_by_color[game_state.side_to_move.index()];
    push_moves_to_targets(game_state, from, PieceKind::King, king_attacks(from) & !own_occ, out);

    generate_castling_moves(game_state, from, out);
}

/// Castling needs the right, an empty path between king and rook, the rook
/// still at home, and no attacked square under the king's start, path or
/// destination.
fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let own_rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == side) {
        if game_state.castling_rights & lane.right == 0
            || lane.king_from != king_from
            || own_rooks & (1u64 << lane.rook_from) == 0
            || game_state.occupancy_all & lane.empty_mask != 0
        {
            continue;
        }

        if lane
            .safe_squares
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }

        out.push(build_move(
            lane.king_from,
            lane.king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}
