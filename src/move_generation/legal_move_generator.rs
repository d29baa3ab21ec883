//! Full legal move generation pipeline.
//!
//! Piece-wise pseudo-legal generation, then simulate-and-discard: each
//! candidate is applied to a scratch copy and dropped if it leaves the mover's
//! king attacked. Order is stable: pawns, knights, sliders, king, each by
//! ascending origin square.

use crate::game_state::{chess_types::Square, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::generate_slider_moves;
use crate::utils::long_algebraic::{move_description_to_long_algebraic, UciMove};

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub move_description: u64,
    /// Position after the move, without the game chain.
    pub game_after_move: GameState,
}

fn generate_pseudo_legal(game_state: &GameState, origin_mask: u64) -> Vec<u64> {
    let mut pseudo = Vec::<u64>::with_capacity(64);

    generate_pawn_moves(game_state, origin_mask, &mut pseudo);
    generate_knight_moves(game_state, origin_mask, &mut pseudo);
    generate_slider_moves(game_state, origin_mask, &mut pseudo);
    generate_king_moves(game_state, origin_mask, &mut pseudo);

    pseudo
}

/// Moves the piece on `square` could make ignoring self-check. Empty for an
/// off-board square, an empty square, or a piece of the side not to move.
pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<u64> {
    if square > 63 {
        return Vec::new();
    }
    generate_pseudo_legal(game_state, 1u64 << square)
}

pub fn all_pseudo_legal_moves(game_state: &GameState) -> Vec<u64> {
    generate_pseudo_legal(game_state, u64::MAX)
}

fn filter_legal(game_state: &GameState, pseudo: Vec<u64>) -> Vec<GeneratedMove> {
    let mover = game_state.side_to_move;

    pseudo
        .into_iter()
        .filter_map(|mv| {
            let next = apply_move(game_state, mv).ok()?;
            (!is_king_in_check(&next, mover)).then_some(GeneratedMove {
                move_description: mv,
                game_after_move: next,
            })
        })
        .collect()
}

pub fn generate_legal_moves(game_state: &GameState) -> Vec<GeneratedMove> {
    filter_legal(game_state, all_pseudo_legal_moves(game_state))
}

pub fn legal_moves(game_state: &GameState) -> Vec<u64> {
    generate_legal_moves(game_state)
        .into_iter()
        .map(|generated| generated.move_description)
        .collect()
}

/// Legal moves starting on `square`, for move highlighting.
pub fn legal_moves_from(game_state: &GameState, square: Square) -> Vec<u64> {
    filter_legal(game_state, pseudo_legal_moves(game_state, square))
        .into_iter()
        .map(|generated| generated.move_description)
        .collect()
}

/// Legal moves as coordinate text, the form bots receive.
pub fn legal_move_strings(game_state: &GameState) -> Vec<String> {
    legal_moves(game_state)
        .into_iter()
        .map(move_description_to_long_algebraic)
        .collect()
}

/// Resolves coordinate text against the legal-move set of `game_state`.
pub fn find_legal_move(game_state: &GameState, uci_move: &UciMove) -> Option<u64> {
    legal_moves_from(game_state, uci_move.from)
        .into_iter()
        .find(|mv| uci_move.matches(*mv))
}

/// Cheaper than `legal_moves(..).is_empty()`: stops at the first legal move.
pub fn has_legal_move(game_state: &GameState) -> bool {
    let mover = game_state.side_to_move;
    all_pseudo_legal_moves(game_state).into_iter().any(|mv| {
        apply_move(game_state, mv)
            .map(|next| !is_king_in_check(&next, mover))
            .unwrap_or(false)
    })
}
