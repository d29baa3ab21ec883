//! Capabilities the host grants to a bot.
//!
//! A bot sees the game only through `HostApi`. The host implementation,
//! `HostView`, owns a private copy of the position taken at the start of the
//! turn, so nothing a bot does through it can reach the live game.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::game_state::board_view::BoardView;
use crate::game_state::game_result::GameResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::game_outcome::game_result;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::legal_move_strings;

/// Read-only queries plus a diagnostic log sink.
pub trait HostApi {
    fn get_board(&self) -> BoardView;
    /// Every legal move of the side to move, as coordinate text.
    fn get_legal_moves(&self) -> Vec<String>;
    fn is_check(&self) -> bool;
    fn get_game_result(&self) -> GameResult;
    fn get_fen(&self) -> String;
    fn log(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotLogRecord {
    pub at: DateTime<Utc>,
    pub bot: String,
    pub message: String,
}

/// Append-only record of bot log calls, shared by the views of one game.
#[derive(Debug, Clone, Default)]
pub struct BotLog {
    records: Arc<Mutex<Vec<BotLogRecord>>>,
}

impl BotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, bot: &str, message: &str) {
        let record = BotLogRecord {
            at: Utc::now(),
            bot: bot.to_owned(),
            message: message.to_owned(),
        };
        // A bot that panicked mid-append poisons the lock; its records are still valid.
        let mut records = self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(record);
    }

    pub fn records(&self) -> Vec<BotLogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages_from(&self, bot: &str) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|record| record.bot == bot)
            .map(|record| record.message)
            .collect()
    }
}

/// `HostApi` over an owned snapshot of one position.
#[derive(Debug, Clone)]
pub struct HostView {
    game_state: GameState,
    bot_name: String,
    log: BotLog,
}

impl HostView {
    pub fn new(game_state: &GameState, bot_name: &str, log: BotLog) -> Self {
        Self {
            game_state: game_state.clone(),
            bot_name: bot_name.to_owned(),
            log,
        }
    }
}

impl HostApi for HostView {
    fn get_board(&self) -> BoardView {
        BoardView::from_state(&self.game_state)
    }

    fn get_legal_moves(&self) -> Vec<String> {
        legal_move_strings(&self.game_state)
    }

    fn is_check(&self) -> bool {
        is_check(&self.game_state)
    }

    fn get_game_result(&self) -> GameResult {
        game_result(&self.game_state)
    }

    fn get_fen(&self) -> String {
        self.game_state.get_fen()
    }

    fn log(&self, message: &str) {
        info!(target: "bot", bot = %self.bot_name, "{message}");
        self.log.append(&self.bot_name, message);
    }
}
