use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{own_pieces, push_moves_to_targets};
use crate::moves::leaper_attacks::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, origin_mask: u64, out: &mut Vec<u64>) {
    let own_occ = game_state.occupancy_by_color[game_state.side_to_move.index()];

    let mut knights = own_pieces(game_state, PieceKind::Knight, origin_mask);
    while knights != 0 {
        let from = knights.trailing_zeros() as Square;
        push_moves_to_targets(
            game_state,
            from,
            PieceKind::Knight,
            knight_attacks(from) & !own_occ,
            out,
        );
        knights &= knights - 1;
    }
}
