//! The single checked mutation point of a game.
//!
//! `execute_move` takes coordinate text from any untrusted source (user, bot,
//! replay), accepts it only if it names a member of the legal-move set, and
//! returns the next state of the chain. The input state is never modified, so
//! every rejection leaves the caller exactly where it was.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::MoveHistoryEntry, game_state::GameState};
use crate::game_state::zobrist::compute_zobrist_key;
use crate::move_generation::game_outcome::game_result;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::find_legal_move;
use crate::utils::long_algebraic::parse_uci_move;

pub fn execute_move(game_state: &GameState, uci: &str) -> ChessResult<GameState> {
    let result = game_result(game_state);
    if result.is_terminal() {
        return Err(ChessError::GameOver(result));
    }

    let uci_move = parse_uci_move(uci)?;
    let move_description = find_legal_move(game_state, &uci_move).ok_or_else(|| {
        ChessError::IllegalMove(format!("{uci} is not legal in {}", game_state.get_fen()))
    })?;

    let mut next = apply_move(game_state, move_description)?;

    let canonical = uci_move.to_string();
    let resulting_fen = next.get_fen();
    debug!(mv = %canonical, fen = %resulting_fen, "move applied");

    next.move_history = game_state.move_history.clone();
    next.move_history.push(MoveHistoryEntry {
        uci_move: canonical,
        resulting_fen,
    });
    next.repetition_history = game_state.repetition_history.clone();
    next.repetition_history.push(compute_zobrist_key(&next));

    Ok(next)
}

/// Plays a whole line of moves, stopping at the first rejected one.
pub fn execute_moves<'a>(
    game_state: &GameState,
    moves: impl IntoIterator<Item = &'a str>,
) -> ChessResult<GameState> {
    moves
        .into_iter()
        .try_fold(game_state.clone(), |state, uci| execute_move(&state, uci))
}
