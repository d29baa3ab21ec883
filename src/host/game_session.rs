//! The state and command surface a front end drives.
//!
//! A session owns the chain of immutable states produced by the executor.
//! The last element is the current position; earlier elements make `undo`
//! a pop instead of a replay.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board_view::BoardView;
use crate::game_state::chess_types::{MoveHistoryEntry, Square};
use crate::game_state::game_result::GameResult;
use crate::game_state::game_state::GameState;
use crate::host::bot_host::{BotHost, TurnOutcome};
use crate::move_generation::game_outcome::game_result;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_executor::execute_move;
use crate::move_generation::legal_move_generator::{legal_move_strings, legal_moves_from};
use crate::utils::long_algebraic::move_description_to_long_algebraic;

#[derive(Debug, Clone)]
pub struct GameSession {
    states: Vec<GameState>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::with_state(GameState::from_fen(fen)?))
    }

    fn with_state(state: GameState) -> Self {
        Self {
            states: vec![state],
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        // The chain is never empty: undo keeps the root.
        &self.states[self.states.len() - 1]
    }

    pub fn board_view(&self) -> BoardView {
        BoardView::from_state(self.state())
    }

    pub fn legal_moves(&self) -> Vec<String> {
        legal_move_strings(self.state())
    }

    pub fn legal_moves_from(&self, square: Square) -> Vec<String> {
        legal_moves_from(self.state(), square)
            .into_iter()
            .map(move_description_to_long_algebraic)
            .collect()
    }

    /// Execute a move typed by the user. On error the session is unchanged.
    pub fn apply_user_move(&mut self, uci: &str) -> ChessResult<&GameState> {
        let next = execute_move(self.state(), uci)?;
        self.states.push(next);
        Ok(self.state())
    }

    /// Let the bot seated for the side to move take its turn.
    ///
    /// A forfeit leaves the position unchanged; the caller decides how to
    /// present it.
    pub fn play_bot_turn(&mut self, host: &mut BotHost) -> ChessResult<TurnOutcome> {
        let outcome = host.play_turn(self.state())?;
        if let TurnOutcome::Moved { next, .. } = &outcome {
            self.states.push(next.clone());
        }
        Ok(outcome)
    }

    pub fn result(&self) -> GameResult {
        game_result(self.state())
    }

    pub fn is_check(&self) -> bool {
        is_check(self.state())
    }

    pub fn fen(&self) -> String {
        self.state().get_fen()
    }

    pub fn history(&self) -> &[MoveHistoryEntry] {
        &self.state().move_history
    }

    pub fn reset(&mut self) {
        self.states.clear();
        self.states.push(GameState::new_game());
        debug!("session reset");
    }

    /// Step back one ply.
    pub fn undo(&mut self) -> ChessResult<&GameState> {
        if self.states.len() <= 1 {
            return Err(ChessError::IllegalMove("nothing to undo".to_owned()));
        }
        self.states.pop();
        Ok(self.state())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
