//! Flat, serializable snapshot of a `GameState`.
//!
//! This is what bots and front-ends read: 64 optional pieces indexed a1..h8,
//! named castling flags and the move history. It owns its data and has no path
//! back to the engine.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingView {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl From<CastlingRights> for CastlingView {
    fn from(rights: CastlingRights) -> Self {
        Self {
            white_kingside: rights & CASTLE_WHITE_KINGSIDE != 0,
            white_queenside: rights & CASTLE_WHITE_QUEENSIDE != 0,
            black_kingside: rights & CASTLE_BLACK_KINGSIDE != 0,
            black_queenside: rights & CASTLE_BLACK_QUEENSIDE != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub squares: Vec<Option<Piece>>,
    pub turn: Color,
    pub castling_rights: CastlingView,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub move_history: Vec<MoveHistoryEntry>,
}

impl BoardView {
    pub fn from_state(game_state: &GameState) -> Self {
        Self {
            squares: (0..64u8).map(|sq| game_state.piece_at(sq)).collect(),
            turn: game_state.side_to_move,
            castling_rights: CastlingView::from(game_state.castling_rights),
            en_passant: game_state.en_passant_square,
            halfmove_clock: game_state.halfmove_clock,
            fullmove_number: game_state.fullmove_number,
            move_history: game_state.move_history.clone(),
        }
    }

    /// Piece on `square`, `None` for empty or out-of-range squares.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(square as usize).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::BoardView;
    use crate::game_state::chess_types::*;

    #[test]
    fn view_of_start_position() {
        let view = BoardView::from_state(&GameState::new_game());

        assert_eq!(view.squares.len(), 64);
        assert_eq!(view.squares.iter().flatten().count(), 32);
        assert_eq!(view.piece_at(12), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(view.piece_at(99), None);
        assert!(view.castling_rights.white_kingside && view.castling_rights.black_queenside);
        assert_eq!(view.turn, Color::White);
    }

    #[test]
    fn view_serializes_to_json() {
        let view = BoardView::from_state(&GameState::new_game());
        let json = serde_json::to_value(&view).expect("view should serialize");

        assert_eq!(json["turn"], "white");
        assert_eq!(json["squares"][4]["kind"], "king");
        assert_eq!(json["squares"][4]["color"], "white");
        assert!(json["squares"][30].is_null());
        assert_eq!(json["fullmove_number"], 1);
    }
}
