//! Seats bots, runs their turns under a time budget and enforces the protocol.
//!
//! Every bot call runs on a worker thread. The bot is moved into the worker
//! and handed back with its reply; if the reply does not arrive within
//! `move_time_budget`, or the bot panics, the bot is abandoned and the seat
//! counts as violating on every later turn. A reply is untrusted text: it is
//! parsed, checked against the legal-move set, and only then executed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use tracing::{info, warn};

use crate::bots::bot_trait::ChessBot;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::host::host_api::{BotLog, HostView};
use crate::host::host_config::{FallbackPolicy, HostConfig};
use crate::move_generation::game_outcome::game_result;
use crate::move_generation::legal_move_executor::execute_move;
use crate::move_generation::legal_move_generator::{find_legal_move, legal_move_strings};
use crate::utils::long_algebraic::parse_uci_move;

struct Seat {
    name: String,
    /// `None` once the bot has been abandoned.
    bot: Option<Box<dyn ChessBot>>,
    violations: u32,
    /// `on_game_start` has been delivered for the current game.
    started: bool,
}

#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Moved {
        next: GameState,
        uci: String,
        /// Set when the host played the move in place of a violating bot.
        fallback_reason: Option<String>,
    },
    Forfeited {
        color: Color,
        reason: String,
    },
}

pub struct BotHost {
    seats: [Option<Seat>; 2],
    config: HostConfig,
    log: BotLog,
}

impl BotHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            seats: [None, None],
            config,
            log: BotLog::new(),
        }
    }

    /// Seats two bots. The first bot gets its preferred color (white when it
    /// has none) and the second bot takes the other side.
    pub fn with_bots(first: Box<dyn ChessBot>, second: Box<dyn ChessBot>, config: HostConfig) -> Self {
        let first_color = first.preferred_color().unwrap_or(Color::White);
        if let Some(wanted) = second.preferred_color() {
            if wanted == first_color {
                info!(bot = %second.name(), %wanted, "color preference overridden");
            }
        }

        let mut host = Self::new(config);
        host.seat(first, first_color);
        host.seat(second, first_color.opposite());
        host
    }

    /// Seats `bot` as `color`, replacing any bot already there.
    pub fn seat(&mut self, bot: Box<dyn ChessBot>, color: Color) {
        let name = bot.name();
        info!(bot = %name, description = %bot.description(), %color, "bot seated");
        self.seats[color.index()] = Some(Seat {
            name,
            bot: Some(bot),
            violations: 0,
            started: false,
        });
    }

    pub fn unseat(&mut self, color: Color) {
        self.seats[color.index()] = None;
    }

    /// Empties both seats; the log is kept.
    pub fn unseat_all(&mut self) {
        self.seats = [None, None];
    }

    pub fn is_started(&self, color: Color) -> bool {
        self.seats[color.index()]
            .as_ref()
            .is_some_and(|seat| seat.started)
    }

    #[inline]
    pub fn has_bot(&self, color: Color) -> bool {
        self.seats[color.index()].is_some()
    }

    pub fn seat_name(&self, color: Color) -> Option<&str> {
        self.seats[color.index()].as_ref().map(|seat| seat.name.as_str())
    }

    pub fn violations(&self, color: Color) -> u32 {
        self.seats[color.index()]
            .as_ref()
            .map_or(0, |seat| seat.violations)
    }

    pub fn is_abandoned(&self, color: Color) -> bool {
        self.seats[color.index()]
            .as_ref()
            .is_some_and(|seat| seat.bot.is_none())
    }

    #[inline]
    pub fn log(&self) -> &BotLog {
        &self.log
    }

    #[inline]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Notifies seated bots that a game starts from `game_state`.
    ///
    /// Each seated instance hears `on_game_start` once; seats already started
    /// are skipped, so seating a bot mid-game only notifies the newcomer.
    pub fn start_game(&mut self, game_state: &GameState) {
        info!(
            white = self.seat_name(Color::White).unwrap_or("-"),
            black = self.seat_name(Color::Black).unwrap_or("-"),
            fen = %game_state.get_fen(),
            "game started"
        );

        for color in Color::BOTH {
            if !self.has_bot(color) || self.is_started(color) {
                continue;
            }
            if let Err(err) = self.run_guarded(color, game_state, |bot, view| bot.on_game_start(view)) {
                self.record_violation(color, &err);
            }
            if let Some(seat) = self.seats[color.index()].as_mut() {
                seat.started = true;
            }
        }
    }

    /// Runs one turn for the side to move in `game_state`.
    ///
    /// `game_state` is never modified; on success the next state is returned
    /// inside the outcome.
    pub fn play_turn(&mut self, game_state: &GameState) -> ChessResult<TurnOutcome> {
        let result = game_result(game_state);
        if result.is_terminal() {
            return Err(ChessError::GameOver(result));
        }

        let color = game_state.side_to_move;
        if !self.has_bot(color) {
            return Err(ChessError::SeatEmpty(color));
        }

        let mut retries_left = self.config.max_retries;
        loop {
            let err = match self.request_move(color, game_state) {
                Ok((next, uci)) => {
                    return Ok(TurnOutcome::Moved {
                        next,
                        uci,
                        fallback_reason: None,
                    })
                }
                Err(err) if err.is_protocol_violation() => err,
                Err(err) => return Err(err),
            };

            self.record_violation(color, &err);

            match self.config.fallback {
                FallbackPolicy::Retry if retries_left > 0 && !self.is_abandoned(color) => {
                    retries_left -= 1;
                }
                FallbackPolicy::Retry | FallbackPolicy::Forfeit => {
                    warn!(%color, reason = %err, "bot forfeits");
                    return Ok(TurnOutcome::Forfeited {
                        color,
                        reason: err.to_string(),
                    });
                }
                FallbackPolicy::SubstituteFirstLegal => {
                    let uci = legal_move_strings(game_state).into_iter().next().ok_or_else(|| {
                        ChessError::Internal("in-progress game without legal moves".to_owned())
                    })?;
                    let next = execute_move(game_state, &uci)?;
                    info!(%color, mv = %uci, "host substituted first legal move");
                    return Ok(TurnOutcome::Moved {
                        next,
                        uci,
                        fallback_reason: Some(err.to_string()),
                    });
                }
            }
        }
    }

    /// The seated bot's hint for `game_state`, checked like a real move.
    pub fn suggest_move_for(&mut self, color: Color, game_state: &GameState) -> ChessResult<String> {
        let reply = self.run_guarded(color, game_state, |bot, view| bot.suggest_move(view))?;
        let name = self.seat_name(color).unwrap_or_default().to_owned();
        validate_reply(game_state, &name, &reply)?;
        Ok(reply)
    }

    fn request_move(&mut self, color: Color, game_state: &GameState) -> ChessResult<(GameState, String)> {
        let reply = self.run_guarded(color, game_state, |bot, view| bot.select_move(view))?;
        let name = self.seat_name(color).unwrap_or_default().to_owned();
        validate_reply(game_state, &name, &reply)?;
        let next = execute_move(game_state, &reply)?;
        Ok((next, reply))
    }

    fn record_violation(&mut self, color: Color, err: &ChessError) {
        warn!(%color, error = %err, "plugin protocol violation");
        if let Some(seat) = self.seats[color.index()].as_mut() {
            seat.violations = seat.violations.saturating_add(1);
        }
    }

    /// Runs `call` against the bot seated as `color` on a worker thread with
    /// the configured time budget. The bot only returns to its seat if the
    /// call completes in time without panicking.
    fn run_guarded<T, F>(&mut self, color: Color, game_state: &GameState, call: F) -> ChessResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn ChessBot, &HostView) -> T + Send + 'static,
    {
        let budget = self.config.move_time_budget;
        let log = self.log.clone();
        let seat = self.seats[color.index()]
            .as_mut()
            .ok_or(ChessError::SeatEmpty(color))?;
        let name = seat.name.clone();

        let Some(mut bot) = seat.bot.take() else {
            return Err(ChessError::violation(&name, "bot was abandoned after an earlier failure"));
        };

        let view = HostView::new(game_state, &name, log);
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name(format!("bot-{color}"))
            .spawn(move || {
                let reply = panic::catch_unwind(AssertUnwindSafe(|| call(bot.as_mut(), &view)));
                // The receiver is gone when the host stopped waiting.
                let _ = tx.send(reply.map(|value| (bot, value)));
            })
            .map_err(|err| ChessError::Internal(format!("failed to spawn bot worker: {err}")))?;

        match rx.recv_timeout(budget) {
            Ok(Ok((bot, value))) => {
                seat.bot = Some(bot);
                Ok(value)
            }
            Ok(Err(payload)) => Err(ChessError::violation(
                &name,
                format!("bot panicked: {}", panic_message(payload.as_ref())),
            )),
            Err(RecvTimeoutError::Timeout) => Err(ChessError::violation(
                &name,
                format!("no reply within {} ms", budget.as_millis()),
            )),
            Err(RecvTimeoutError::Disconnected) => Err(ChessError::violation(
                &name,
                "bot worker exited without replying",
            )),
        }
    }
}

/// Checks a bot reply against `game_state` without trimming or guessing.
fn validate_reply(game_state: &GameState, bot: &str, reply: &str) -> ChessResult<()> {
    if reply.is_empty() {
        return Err(ChessError::violation(bot, "returned an empty move"));
    }

    let uci_move = parse_uci_move(reply)
        .map_err(|_| ChessError::violation(bot, format!("returned malformed move '{reply}'")))?;

    if find_legal_move(game_state, &uci_move).is_none() {
        return Err(ChessError::violation(bot, format!("returned illegal move '{reply}'")));
    }

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
