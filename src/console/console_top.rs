//! Line-oriented console front end.
//!
//! Reads one command per line, drives a `GameSession` and lets seated bots
//! play the side to move on request. Replies are plain text; `json` prints
//! the board view for tools that want structure.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::bots::bot_random::RandomBot;
use crate::bots::bot_smart::SmartBot;
use crate::bots::bot_trait::ChessBot;
use crate::errors::ChessError;
use crate::host::bot_host::{BotHost, TurnOutcome};
use crate::host::game_session::GameSession;
use crate::host::host_config::HostConfig;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::render_game_state::render_game_state;

const HELP_TEXT: &str = "commands: move <uci> | moves [square] | bot random|smart | board | fen | json | undo | reset | help | quit";

pub fn run_stdio_loop(config: HostConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(GameSession::new(), config);

    writeln!(stdout, "{HELP_TEXT}")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleState {
    session: GameSession,
    host: BotHost,
}

impl ConsoleState {
    pub fn new(session: GameSession, config: HostConfig) -> Self {
        Self {
            session,
            host: BotHost::new(config),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn host(&self) -> &BotHost {
        &self.host
    }

    /// Handles one input line. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        debug!(%cmd, "console command");

        match cmd {
            "move" => match parts.next() {
                Some(uci) => self.handle_move(uci, out)?,
                None => writeln!(out, "error: usage: move <uci>")?,
            },
            "moves" => self.handle_moves(parts.next(), out)?,
            "bot" => match parts.next() {
                Some(kind) => self.handle_bot(kind, out)?,
                None => writeln!(out, "error: usage: bot random|smart")?,
            },
            "board" => {
                write!(out, "{}", render_game_state(self.session.state()))?;
            }
            "fen" => {
                writeln!(out, "{}", self.session.fen())?;
            }
            "json" => match serde_json::to_string(&self.session.board_view()) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "undo" => match self.session.undo() {
                Ok(state) => writeln!(out, "ok {}", state.get_fen())?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "reset" => {
                // Bot instances belong to one game; a new game seats fresh ones.
                self.host.unseat_all();
                self.session.reset();
                writeln!(out, "ok {}", self.session.fen())?;
            }
            "help" => {
                writeln!(out, "{HELP_TEXT}")?;
            }
            "quit" | "exit" => {
                return Ok(true);
            }
            other => {
                writeln!(out, "error: unknown command '{other}'")?;
            }
        }

        Ok(false)
    }

    fn handle_move(&mut self, uci: &str, out: &mut impl Write) -> io::Result<()> {
        match self.session.apply_user_move(uci) {
            Ok(_) => {
                writeln!(out, "ok {uci}")?;
                self.write_status(out)
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn handle_moves(&self, square: Option<&str>, out: &mut impl Write) -> io::Result<()> {
        let moves = match square {
            Some(text) => match algebraic_to_square(text) {
                Ok(square) => self.session.legal_moves_from(square),
                Err(err) => return writeln!(out, "error: {err}"),
            },
            None => self.session.legal_moves(),
        };
        writeln!(out, "{}", moves.join(" "))
    }

    fn handle_bot(&mut self, kind: &str, out: &mut impl Write) -> io::Result<()> {
        let seed = self.host.config().seed;
        let bot: Box<dyn ChessBot> = match kind {
            "random" if seed == 0 => Box::new(RandomBot::new()),
            "random" => Box::new(RandomBot::with_seed(seed)),
            "smart" if seed == 0 => Box::new(SmartBot::new()),
            "smart" => Box::new(SmartBot::with_seed(seed)),
            other => return writeln!(out, "error: unknown bot '{other}'"),
        };

        // Keep an already seated bot of the same kind so its state carries over.
        let color = self.session.state().side_to_move;
        if self.host.seat_name(color) != Some(bot.name().as_str()) || self.host.is_abandoned(color) {
            self.host.seat(bot, color);
            self.host.start_game(self.session.state());
        }

        match self.session.play_bot_turn(&mut self.host) {
            Ok(TurnOutcome::Moved {
                uci,
                fallback_reason: None,
                ..
            }) => {
                writeln!(out, "bot {uci}")?;
                self.write_status(out)
            }
            Ok(TurnOutcome::Moved {
                uci,
                fallback_reason: Some(reason),
                ..
            }) => {
                writeln!(out, "bot {uci} (substituted: {reason})")?;
                self.write_status(out)
            }
            Ok(TurnOutcome::Forfeited { color, reason }) => {
                writeln!(out, "forfeit {color}: {reason}")
            }
            Err(ChessError::GameOver(result)) => writeln!(out, "error: game is over ({result})"),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn write_status(&self, out: &mut impl Write) -> io::Result<()> {
        let result = self.session.result();
        if result.is_terminal() {
            writeln!(out, "result {result}")
        } else if self.session.is_check() {
            writeln!(out, "check")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleState;
    use crate::game_state::chess_types::Color;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::host::game_session::GameSession;
    use crate::host::host_config::HostConfig;

    fn console() -> ConsoleState {
        ConsoleState::new(
            GameSession::new(),
            HostConfig {
                seed: 17,
                ..HostConfig::default()
            },
        )
    }

    fn run(console: &mut ConsoleState, line: &str) -> String {
        let mut out = Vec::<u8>::new();
        console
            .handle_command(line, &mut out)
            .expect("writing to a Vec should not fail");
        String::from_utf8(out).expect("console output should be UTF-8")
    }

    #[test]
    fn move_and_fen() {
        let mut console = console();
        assert_eq!(run(&mut console, "move e2e4"), "ok e2e4\n");
        assert_eq!(
            run(&mut console, "fen"),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\n"
        );
    }

    #[test]
    fn illegal_move_is_reported_and_ignored() {
        let mut console = console();
        assert!(run(&mut console, "move e2e5").starts_with("error: illegal move"));
        assert!(run(&mut console, "move").starts_with("error: usage"));
        assert_eq!(run(&mut console, "fen").trim_end(), STARTING_POSITION_FEN);
    }

    #[test]
    fn moves_lists_all_or_from_square() {
        let mut console = console();
        assert_eq!(run(&mut console, "moves").split_whitespace().count(), 20);
        assert_eq!(run(&mut console, "moves b1"), "b1a3 b1c3\n");
        assert!(run(&mut console, "moves z1").starts_with("error: invalid square"));
    }

    #[test]
    fn checkmate_is_announced() {
        let mut console = console();
        for uci in ["f2f3", "e7e5", "g2g4"] {
            run(&mut console, &format!("move {uci}"));
        }
        assert_eq!(run(&mut console, "move d8h4"), "ok d8h4\nresult checkmate\n");
        assert!(run(&mut console, "bot random").starts_with("error: game is over"));
    }

    #[test]
    fn bot_plays_the_side_to_move() {
        let mut console = console();
        run(&mut console, "move e2e4");
        let reply = run(&mut console, "bot smart");
        assert!(reply.starts_with("bot "), "unexpected reply: {reply}");
        assert_eq!(console.session().history().len(), 2);
        assert!(run(&mut console, "bot chess-master").starts_with("error: unknown bot"));
    }

    #[test]
    fn json_board_view() {
        let mut console = console();
        let json = run(&mut console, "json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json should parse");
        assert_eq!(value["fullmove_number"], 1);
        assert_eq!(value["squares"].as_array().map(Vec::len), Some(64));
    }

    #[test]
    fn undo_reset_and_quit() {
        let mut console = console();
        run(&mut console, "move g1f3");
        assert!(run(&mut console, "undo").starts_with("ok "));
        assert!(run(&mut console, "undo").starts_with("error:"));
        run(&mut console, "move d2d4");
        assert_eq!(run(&mut console, "reset"), format!("ok {STARTING_POSITION_FEN}\n"));
        assert!(run(&mut console, "board").contains('♜'));
        assert!(run(&mut console, "dance").starts_with("error: unknown command"));

        let mut out = Vec::new();
        assert!(console.handle_command("quit", &mut out).expect("quit should not fail"));
    }

    fn random_bot_starts(console: &ConsoleState) -> usize {
        console
            .host()
            .log()
            .messages_from("Random Bot")
            .iter()
            .filter(|message| message.as_str() == "Random Bot: game started")
            .count()
    }

    #[test]
    fn reset_seats_a_fresh_bot_for_the_new_game() {
        let mut console = console();
        run(&mut console, "move e2e4");
        assert!(run(&mut console, "bot random").starts_with("bot "));
        assert_eq!(random_bot_starts(&console), 1);

        run(&mut console, "reset");
        assert!(!console.host().has_bot(Color::Black));
        run(&mut console, "move e2e4");
        assert!(run(&mut console, "bot random").starts_with("bot "));
        assert_eq!(random_bot_starts(&console), 2);
    }

    #[test]
    fn seating_a_second_bot_does_not_restart_the_first() {
        let mut console = console();
        run(&mut console, "move e2e4");
        assert!(run(&mut console, "bot random").starts_with("bot "));
        assert!(run(&mut console, "bot random").starts_with("bot "));
        assert_eq!(random_bot_starts(&console), 2);

        // Black to move again: the same bot keeps its seat.
        assert!(run(&mut console, "bot random").starts_with("bot "));
        assert_eq!(random_bot_starts(&console), 2);
    }
}
