use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::moves::move_descriptions::FLAG_CAPTURE;

#[inline]
pub fn piece_on_square_for_color(
    game_state: &GameState,
    color: Color,
    square: Square,
) -> Option<PieceKind> {
    let mask = 1u64 << square;
    PieceKind::ALL
        .into_iter()
        .find(|piece| game_state.pieces[color.index()][piece.index()] & mask != 0)
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    piece_on_square_for_color(game_state, game_state.side_to_move.opposite(), square)
}

/// Side-to-move pieces of `kind` restricted to `origin_mask`.
#[inline]
pub fn own_pieces(game_state: &GameState, kind: PieceKind, origin_mask: u64) -> u64 {
    game_state.pieces[game_state.side_to_move.index()][kind.index()] & origin_mask
}

/// Emits one quiet move or capture per set bit of `targets`. Friendly
/// squares must already be masked out.
pub fn push_moves_to_targets(
    game_state: &GameState,
    from: Square,
    moved_piece: PieceKind,
    mut targets: u64,
    out: &mut Vec<u64>,
) {
    let enemy_occ = game_state.occupancy_by_color[game_state.side_to_move.opposite().index()];

    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        if enemy_occ & (1u64 << to) != 0 {
            let captured = enemy_piece_on(game_state, to);
            out.push(build_move(from, to, moved_piece, captured, None, FLAG_CAPTURE));
        } else {
            out.push(build_move(from, to, moved_piece, None, None, 0));
        }
        targets &= targets - 1;
    }
}
