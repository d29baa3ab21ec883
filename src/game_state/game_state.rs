//! Core board state representation.
//!
//! `GameState` is the single value passed between the rules engine, the
//! executor, the serializer and the bot host. It stores piece bitboards,
//! occupancy caches, turn/state flags, clocks and the append-only history of
//! the game chain that produced it. Every transition builds a new value; a
//! holder of an older `GameState` never observes a change.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Game chain ---
    pub move_history: Vec<MoveHistoryEntry>,
    /// Position keys of every state in the chain, root included.
    pub repetition_history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            move_history: Vec::new(),
            repetition_history: Vec::new(),
        }
    }
}

/// Two states are equal when their snapshots are: placement, side to move,
/// castling rights, en-passant target and clocks. The chain that led to a
/// position is metadata and does not take part in the comparison, which is
/// what makes `parse_fen(generate_fen(s)) == s` hold.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for GameState {}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial placement, white to move, all castling rights.
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).unwrap_or_else(|err| {
            unreachable!("starting FEN must always parse: {err}")
        })
    }

    /// Parses a FEN snapshot and starts a new chain rooted at it.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let mut state = parse_fen(fen)?;
        state.repetition_history.push(compute_zobrist_key(&state));
        Ok(state)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Copy of the position without the game chain, used as the scratch
    /// board when simulating candidate moves.
    pub fn position_snapshot(&self) -> Self {
        Self {
            pieces: self.pieces,
            occupancy_by_color: self.occupancy_by_color,
            occupancy_all: self.occupancy_all,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            move_history: Vec::new(),
            repetition_history: Vec::new(),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square > 63 {
            return None;
        }
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in Color::BOTH {
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][PieceKind::King.index()];
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.occupancy_all.count_ones()
    }

    /// Rebuilds the occupancy caches from the piece bitboards.
    pub fn recalc_occupancy(&mut self) {
        for color in Color::BOTH {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_initial_setup() {
        let game = GameState::new_game();

        assert_eq!(game.piece_count(), 32);
        assert_eq!(game.occupancy_by_color[Color::White.index()].count_ones(), 16);
        assert_eq!(game.occupancy_by_color[Color::Black.index()].count_ones(), 16);
        assert_eq!(game.side_to_move, Color::White);
        assert_eq!(game.castling_rights, CASTLE_ALL);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 1);
        assert!(game.move_history.is_empty());
        assert_eq!(game.repetition_history.len(), 1);
    }

    #[test]
    fn piece_at_reports_color_and_kind() {
        let game = GameState::new_game();
        assert_eq!(game.piece_at(4), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(game.piece_at(59), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(game.piece_at(28), None);
        assert_eq!(game.piece_at(64), None);
    }

    #[test]
    fn snapshot_drops_chain_but_compares_equal() {
        let game = GameState::new_game();
        let snapshot = game.position_snapshot();
        assert!(snapshot.repetition_history.is_empty());
        assert_eq!(snapshot, game);
        assert_eq!(snapshot.king_square(Color::Black), Some(60));
    }
}
