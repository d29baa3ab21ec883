use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = game_state.king_square(color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether the side to move is in check.
#[inline]
pub fn is_check(game_state: &GameState) -> bool {
    is_king_in_check(game_state, game_state.side_to_move)
}

/// Reverse lookup: cast each attack pattern from `square` and look for an
/// attacker of the matching kind at the far end. Kings count as plain
/// adjacency, so this never recurses into move legality.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attackers = &game_state.pieces[attacker_color.index()];

    // A pawn of `attacker_color` attacks `square` exactly when a pawn of the
    // other color on `square` would attack it.
    if pawn_attacks(attacker_color.opposite(), square) & attackers[PieceKind::Pawn.index()] != 0 {
        return true;
    }

    if knight_attacks(square) & attackers[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if king_attacks(square) & attackers[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = attackers[PieceKind::Queen.index()];
    let occupancy = game_state.occupancy_all;

    if bishop_attacks(square, occupancy) & (attackers[PieceKind::Bishop.index()] | queens) != 0 {
        return true;
    }

    rook_attacks(square, occupancy) & (attackers[PieceKind::Rook.index()] | queens) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn pawn_attacks_are_directional() {
        let game = state("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(is_square_attacked(&game, 19, Color::White));
        assert!(is_square_attacked(&game, 21, Color::White));
        assert!(!is_square_attacked(&game, 20, Color::White));
        assert!(!is_square_attacked(&game, 4, Color::Black));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let game = state("4k3/8/8/8/8/8/4P3/4RK2 b - - 0 1");
        assert!(!is_square_attacked(&game, 60, Color::White));
        assert!(is_square_attacked(&game, 0, Color::White));
    }

    #[test]
    fn check_detection_uses_side_to_move() {
        let game = state("4k3/8/8/8/8/8/8/4RK2 b - - 0 1");
        assert!(is_check(&game));
        assert!(!is_king_in_check(&game, Color::White));
        assert!(!is_check(&GameState::new_game()));
    }

    #[test]
    fn adjacent_king_counts_as_attacker() {
        let game = state("8/8/8/8/8/2k5/8/K7 w - - 0 1");
        assert!(is_square_attacked(&game, 9, Color::Black));
        assert!(!is_square_attacked(&game, 0, Color::Black));
    }
}
