//! Head-to-head bot matches through the plugin host.
//!
//! Runs two bots against each other with every move going through
//! `BotHost`, so time budgets, validation and fallbacks apply exactly as they
//! would against a human.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::bots::bot_trait::ChessBot;
use crate::errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_result::{DrawReason, GameResult};
use crate::game_state::game_state::GameState;
use crate::host::bot_host::{BotHost, TurnOutcome};
use crate::host::host_api::BotLogRecord;
use crate::host::host_config::HostConfig;
use crate::move_generation::game_outcome::game_result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Checkmate { winner: Color },
    Forfeit { winner: Color },
    Stalemate,
    Draw(DrawReason),
    /// Stopped after `max_plies` without a result.
    MaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::Checkmate { winner } | MatchOutcome::Forfeit { winner } => Some(winner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub white_name: String,
    pub black_name: String,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
    /// Moves the host played for a violating bot.
    pub substituted_moves: u32,
    pub log: Vec<BotLogRecord>,
}

impl MatchResult {
    #[inline]
    pub fn moves(&self) -> Vec<&str> {
        self.final_state
            .move_history
            .iter()
            .map(|entry| entry.uci_move.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub per_game: HostConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            per_game: HostConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub forfeits: u16,
    pub outcomes: Vec<(PlayerId, MatchOutcome)>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} forfeits={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.forfeits,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms
        )
    }
}

/// Play one game from the standard start position.
pub fn play_bot_match(
    white: Box<dyn ChessBot>,
    black: Box<dyn ChessBot>,
    config: &HostConfig,
) -> ChessResult<MatchResult> {
    play_bot_match_from_state(white, black, GameState::new_game(), config)
}

pub fn play_bot_match_from_state(
    white: Box<dyn ChessBot>,
    black: Box<dyn ChessBot>,
    start_state: GameState,
    config: &HostConfig,
) -> ChessResult<MatchResult> {
    let mut host = BotHost::new(config.clone());
    host.seat(white, Color::White);
    host.seat(black, Color::Black);
    host.start_game(&start_state);

    let mut result = MatchResult {
        outcome: MatchOutcome::MaxPlies,
        final_state: start_state,
        white_name: host.seat_name(Color::White).unwrap_or_default().to_owned(),
        black_name: host.seat_name(Color::Black).unwrap_or_default().to_owned(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
        substituted_moves: 0,
        log: Vec::new(),
    };

    for _ in 0..config.max_plies {
        if let Some(outcome) = finished_outcome(&result.final_state) {
            result.outcome = outcome;
            break;
        }

        let mover = result.final_state.side_to_move;
        let started = Instant::now();
        let turn = host.play_turn(&result.final_state)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        match turn {
            TurnOutcome::Moved {
                next,
                fallback_reason,
                ..
            } => {
                if fallback_reason.is_some() {
                    result.substituted_moves += 1;
                }
                result.final_state = next;
            }
            TurnOutcome::Forfeited { color, .. } => {
                result.outcome = MatchOutcome::Forfeit {
                    winner: color.opposite(),
                };
                break;
            }
        }
    }

    // The last ply may have ended the game.
    if result.outcome == MatchOutcome::MaxPlies {
        if let Some(outcome) = finished_outcome(&result.final_state) {
            result.outcome = outcome;
        }
    }

    result.log = host.log().records();
    info!(
        white = %result.white_name,
        black = %result.black_name,
        outcome = ?result.outcome,
        plies = result.final_state.move_history.len(),
        "game finished"
    );

    Ok(result)
}

fn finished_outcome(game_state: &GameState) -> Option<MatchOutcome> {
    match game_result(game_state) {
        GameResult::InProgress => None,
        GameResult::Checkmate => Some(MatchOutcome::Checkmate {
            winner: game_state.side_to_move.opposite(),
        }),
        GameResult::Stalemate => Some(MatchOutcome::Stalemate),
        GameResult::Draw(reason) => Some(MatchOutcome::Draw(reason)),
    }
}

/// Play a series and aggregate win/loss/draw statistics.
///
/// Colors are drawn per game from `per_game.seed`, so a series is
/// reproducible whenever the bots themselves are.
pub fn play_bot_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn(u64) -> Box<dyn ChessBot>,
    F2: Fn(u64) -> Box<dyn ChessBot>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.per_game.seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let game_seed = config.per_game.seed.wrapping_add(u64::from(i));

        let (white, black) = if player1_is_white {
            (player1_factory(game_seed), player2_factory(game_seed))
        } else {
            (player2_factory(game_seed), player1_factory(game_seed))
        };
        let result = play_bot_match(white, black, &config.per_game)?;

        let (p1_color, p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_white {
            (
                Color::White,
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        } else {
            (
                Color::Black,
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        if matches!(result.outcome, MatchOutcome::Forfeit { .. }) {
            stats.forfeits += 1;
        }
        match result.outcome.winner() {
            Some(color) if color == p1_color => stats.player1_wins += 1,
            Some(_) => stats.player2_wins += 1,
            None => stats.draws += 1,
        }

        let white_player = if player1_is_white {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };
        stats.outcomes.push((white_player, result.outcome));
    }

    stats.player1_avg_move_time_ms = avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms = avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::bots::bot_random::RandomBot;
    use crate::bots::bot_smart::SmartBot;
    use crate::host::host_api::HostApi;
    use crate::host::host_config::FallbackPolicy;

    struct ResigningBot;

    impl ChessBot for ResigningBot {
        fn name(&self) -> String {
            "Resigner".to_owned()
        }

        fn description(&self) -> String {
            "always answers with nothing".to_owned()
        }

        fn select_move(&mut self, _host: &dyn HostApi) -> String {
            String::new()
        }

        fn suggest_move(&self, _host: &dyn HostApi) -> String {
            String::new()
        }
    }

    fn short_config() -> HostConfig {
        HostConfig {
            max_plies: 60,
            ..HostConfig::default()
        }
    }

    #[test]
    fn random_vs_smart_runs_to_an_outcome() {
        let result = play_bot_match(
            Box::new(RandomBot::with_seed(42)),
            Box::new(SmartBot::with_seed(42)),
            &short_config(),
        )
        .expect("match should run");

        assert_eq!(result.white_name, "Random Bot");
        assert_eq!(result.black_name, "Smart Bot");
        assert!(result.white_move_count >= result.black_move_count);
        assert_eq!(
            result.moves().len() as u32,
            result.white_move_count + result.black_move_count
        );
        assert!(result.moves().len() <= 60);
        assert_eq!(result.substituted_moves, 0);
        assert!(!result.log.is_empty());
    }

    #[test]
    fn forfeit_policy_ends_the_match() {
        let config = HostConfig {
            fallback: FallbackPolicy::Forfeit,
            ..short_config()
        };
        let result = play_bot_match(Box::new(ResigningBot), Box::new(RandomBot::with_seed(1)), &config)
            .expect("match should run");

        assert_eq!(result.outcome, MatchOutcome::Forfeit { winner: Color::Black });
        assert!(result.moves().is_empty());
    }

    #[test]
    fn substitution_keeps_the_game_going() {
        let result = play_bot_match(
            Box::new(ResigningBot),
            Box::new(RandomBot::with_seed(9)),
            &HostConfig {
                max_plies: 10,
                ..HostConfig::default()
            },
        )
        .expect("match should run");

        assert_eq!(result.substituted_moves, result.white_move_count);
        assert!(result.white_move_count > 0);
    }

    #[test]
    fn finished_position_is_scored_without_moves() {
        let mated = GameState::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let result = play_bot_match_from_state(
            Box::new(RandomBot::with_seed(1)),
            Box::new(RandomBot::with_seed(2)),
            mated,
            &HostConfig::default(),
        )
        .expect("match should run");

        assert_eq!(result.outcome, MatchOutcome::Checkmate { winner: Color::White });
        assert_eq!(result.white_move_count + result.black_move_count, 0);
    }

    #[test]
    fn series_is_reproducible_for_seeded_bots() {
        let config = MatchSeriesConfig {
            games: 3,
            per_game: HostConfig {
                max_plies: 30,
                seed: 777,
                ..HostConfig::default()
            },
        };
        let run = || {
            play_bot_match_series(
                |seed| Box::new(RandomBot::with_seed(seed)),
                |seed| Box::new(SmartBot::with_seed(seed)),
                &config,
            )
            .expect("series should run")
        };

        let first = run();
        let second = run();
        assert_eq!(first.games, 3);
        assert_eq!(first.outcomes.len(), 3);
        assert_eq!(first.player1_wins + first.player2_wins + first.draws, 3);
        assert_eq!(first.outcomes, second.outcomes);
        assert!(first.report().starts_with("games=3"));
    }

    #[test]
    fn independent_matches_run_concurrently() {
        let outcomes: Vec<MatchResult> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4u64)
                .map(|seed| {
                    scope.spawn(move || {
                        play_bot_match(
                            Box::new(RandomBot::with_seed(seed)),
                            Box::new(RandomBot::with_seed(seed + 100)),
                            &short_config(),
                        )
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .expect("match thread should not panic")
                        .expect("match should run")
                })
                .collect()
        });

        assert_eq!(outcomes.len(), 4);
        for result in &outcomes {
            assert!(result.moves().len() <= 60);
            assert_eq!(result.substituted_moves, 0);
        }
    }
}
