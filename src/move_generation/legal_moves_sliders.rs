//! Bishop, rook and queen moves by ray casting. Each ray stops at the first
//! occupied square, which is a capture when it holds an enemy piece.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{own_pieces, push_moves_to_targets};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_slider_moves(game_state: &GameState, origin_mask: u64, out: &mut Vec<u64>) {
    let own_occ = game_state.occupancy_by_color[game_state.side_to_move.index()];
    let occupancy = game_state.occupancy_all;

    let sliders: [(PieceKind, fn(Square, u64) -> u64); 3] = [
        (PieceKind::Bishop, bishop_attacks),
        (PieceKind::Rook, rook_attacks),
        (PieceKind::Queen, queen_attacks),
    ];

    for (kind, attacks_for) in sliders {
        let mut pieces = own_pieces(game_state, kind, origin_mask);
        while pieces != 0 {
            let from = pieces.trailing_zeros() as Square;
            push_moves_to_targets(
                game_state,
                from,
                kind,
                attacks_for(from, occupancy) & !own_occ,
                out,
            );
            pieces &= pieces - 1;
        }
    }
}
