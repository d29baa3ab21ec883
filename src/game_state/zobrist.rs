//! Zobrist position keys for repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs. Keys are always recomputed from scratch; states never carry a cached
//! hash that a transition could forget to update.

use std::sync::OnceLock;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::pawn_attacks;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x243F_6A88_85A3_08D3;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for key in piece_square.iter_mut().flatten().flatten() {
        *key = splitmix64(&mut seed);
    }

    let black_to_move = splitmix64(&mut seed);

    let mut castling = [0u64; 16];
    castling.iter_mut().for_each(|key| *key = splitmix64(&mut seed));

    let mut en_passant_file = [0u64; 8];
    en_passant_file
        .iter_mut()
        .for_each(|key| *key = splitmix64(&mut seed));

    ZobristTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key identifying placement, side to move, castling rights and en-passant file.
///
/// The en-passant file only counts when a pawn of the side to move could
/// actually capture there, so a bare double push repeats like any other move.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let t = tables();
    let mut key = 0u64;

    for color in Color::BOTH {
        for kind in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][kind.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                key ^= t.piece_square[color.index()][kind.index()][sq];
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= t.black_to_move;
    }

    key ^= t.castling[(game_state.castling_rights & 0x0F) as usize];

    if let Some(ep_square) = capturable_en_passant_square(game_state) {
        key ^= t.en_passant_file[square_file(ep_square) as usize];
    }

    key
}

#[inline]
fn capturable_en_passant_square(game_state: &GameState) -> Option<Square> {
    let ep_square = game_state.en_passant_square?;
    let mover = game_state.side_to_move;
    // Squares a capturing pawn could stand on mirror the attacks of an enemy pawn on the target.
    let capturers = pawn_attacks(mover.opposite(), ep_square)
        & game_state.pieces[mover.index()][PieceKind::Pawn.index()];
    (capturers != 0).then_some(ep_square)
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::game_outcome::repetition_count;
    use crate::move_generation::legal_move_executor::execute_moves;

    fn key_of(fen: &str) -> u64 {
        compute_zobrist_key(&GameState::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn starting_position_key_is_deterministic() {
        assert_eq!(
            compute_zobrist_key(&GameState::new_game()),
            compute_zobrist_key(&GameState::new_game())
        );
    }

    #[test]
    fn side_castling_and_en_passant_change_the_key() {
        let base = key_of("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_ne!(base, key_of("4k3/8/8/8/8/8/8/R3K2R b KQ - 0 1"));
        assert_ne!(base, key_of("4k3/8/8/8/8/8/8/R3K2R w - - 0 1"));

        let no_ep = key_of("4k3/8/8/8/4Pp2/8/8/4K3 b - - 0 1");
        let ep = key_of("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1");
        assert_ne!(no_ep, ep);
    }

    #[test]
    fn en_passant_without_a_capturer_is_ignored() {
        assert_eq!(
            key_of("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1"),
            key_of("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1")
        );
    }

    #[test]
    fn position_after_a_double_push_repeats_through_knight_moves() {
        let game = execute_moves(
            &GameState::new_game(),
            ["e2e4", "g8f6", "g1f3", "f6g8", "f3g1", "g8f6", "g1f3", "f6g8", "f3g1"],
        )
        .expect("moves should be legal");
        // After 1.e4 and after each knight round trip, black faces the same position.
        assert_eq!(repetition_count(&game), 3);
    }

    #[test]
    fn clocks_do_not_change_the_key() {
        assert_eq!(
            key_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            key_of("4k3/8/8/8/8/8/8/4K3 w - - 37 60")
        );
    }
}
