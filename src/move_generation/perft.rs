//! Perft node counting for move-generation verification and benchmarking.

use std::thread;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, has_legal_move, GeneratedMove,
};
use crate::moves::move_descriptions::{
    move_has_flag, move_promotion_piece, FLAG_CAPTURE, FLAG_CASTLING, FLAG_EN_PASSANT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf counts only: the fast path used by tests and the bench.
pub fn perft(game_state: &GameState, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(game_state);
    if depth == 1 {
        return moves.len();
    }

    moves
        .iter()
        .map(|mv| perft(&mv.game_after_move, depth - 1))
        .sum()
}

/// Leaf counts with per-leaf move tallies.
pub fn perft_detailed(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        perft_recurse(&mv, depth, 1, &mut total);
    }
    total
}

/// Splits the root moves across one thread each.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(perft_detailed(game_state, 0));
    }

    let handles: Vec<_> = generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                perft_recurse(&mv, depth, 1, &mut local);
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| ChessError::Internal("perft worker thread panicked".to_owned()))?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(mv: &GeneratedMove, search_depth: u8, current_depth: u8, counts: &mut PerftCounts) {
    if current_depth == search_depth {
        let description = mv.move_description;
        counts.nodes += 1;
        counts.captures += usize::from(move_has_flag(description, FLAG_CAPTURE));
        counts.en_passant += usize::from(move_has_flag(description, FLAG_EN_PASSANT));
        counts.castles += usize::from(move_has_flag(description, FLAG_CASTLING));
        counts.promotions += usize::from(move_promotion_piece(description).is_some());

        if is_check(&mv.game_after_move) {
            counts.checks += 1;
            if !has_legal_move(&mv.game_after_move) {
                counts.checkmates += 1;
            }
        }
        return;
    }

    for child in generate_legal_moves(&mv.game_after_move) {
        perft_recurse(&child, search_depth, current_depth + 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn start_position_counts() {
        let game = GameState::new_game();
        assert_eq!(perft(&game, 0), 1);
        assert_eq!(perft(&game, 1), 20);
        assert_eq!(perft(&game, 2), 400);
        assert_eq!(perft(&game, 3), 8_902);
    }

    #[test]
    fn start_position_depth_three_tallies() {
        let counts = perft_detailed(&GameState::new_game(), 3);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8_902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_counts() {
        let game = state(KIWIPETE);
        assert_eq!(perft(&game, 1), 48);
        assert_eq!(perft(&game, 2), 2_039);

        let counts = perft_detailed(&game, 2);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.checks, 3);
    }

    #[test]
    fn endgame_position_counts() {
        let game = state(POSITION_3);
        assert_eq!(perft(&game, 1), 14);
        assert_eq!(perft(&game, 2), 191);
        assert_eq!(perft(&game, 3), 2_812);
    }

    #[test]
    fn promotion_heavy_position_counts() {
        let game = state(POSITION_4);
        assert_eq!(perft(&game, 1), 6);
        assert_eq!(perft(&game, 2), 264);
        assert_eq!(perft(&game, 3), 9_467);
    }

    #[test]
    fn position_five_counts() {
        let game = state(POSITION_5);
        assert_eq!(perft(&game, 1), 44);
        assert_eq!(perft(&game, 2), 1_486);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let game = state(KIWIPETE);
        let threaded = perft_multi_threaded(&game, 2).expect("perft workers should finish");
        assert_eq!(threaded, perft_detailed(&game, 2));
        assert_eq!(threaded.nodes, 2_039);
    }
}
