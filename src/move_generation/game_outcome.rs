//! Game result evaluation.
//!
//! Results are always computed from the state, never cached on it. A side with
//! no legal moves is checkmated or stalemated; only if it can still move do the
//! automatic draw rules apply.

use crate::game_state::chess_rules::{DARK_SQUARES, FIFTY_MOVE_RULE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::game_result::{DrawReason, GameResult};
use crate::game_state::zobrist::compute_zobrist_key;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::has_legal_move;

pub fn game_result(game_state: &GameState) -> GameResult {
    if !has_legal_move(game_state) {
        return if is_check(game_state) {
            GameResult::Checkmate
        } else {
            GameResult::Stalemate
        };
    }

    if is_insufficient_material(game_state) {
        return GameResult::Draw(DrawReason::InsufficientMaterial);
    }

    if game_state.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES {
        return GameResult::Draw(DrawReason::FiftyMoveRule);
    }

    if repetition_count(game_state) >= REPETITION_DRAW_COUNT {
        return GameResult::Draw(DrawReason::ThreefoldRepetition);
    }

    GameResult::InProgress
}

/// How many states of this game's chain share the current position key.
pub fn repetition_count(game_state: &GameState) -> usize {
    let key = compute_zobrist_key(game_state);
    game_state
        .repetition_history
        .iter()
        .filter(|seen| **seen == key)
        .count()
}

/// King vs king, king and one minor piece vs king, or king and bishop vs king
/// and bishop with both bishops on the same square color.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    let has_mating_material = Color::BOTH.iter().any(|color| {
        heavy_or_pawn
            .iter()
            .any(|kind| game_state.pieces[color.index()][kind.index()] != 0)
    });
    if has_mating_material {
        return false;
    }

    let minors = |color: Color| {
        let own = &game_state.pieces[color.index()];
        (
            own[PieceKind::Knight.index()],
            own[PieceKind::Bishop.index()],
        )
    };
    let (white_knights, white_bishops) = minors(Color::White);
    let (black_knights, black_bishops) = minors(Color::Black);

    let white_minor_count = (white_knights | white_bishops).count_ones();
    let black_minor_count = (black_knights | black_bishops).count_ones();

    match (white_minor_count, black_minor_count) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) if white_knights == 0 && black_knights == 0 => {
            let white_on_dark = white_bishops & DARK_SQUARES != 0;
            let black_on_dark = black_bishops & DARK_SQUARES != 0;
            white_on_dark == black_on_dark
        }
        _ => false,
    }
}
