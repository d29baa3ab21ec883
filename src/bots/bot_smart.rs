//! One-ply heuristic bot.
//!
//! Scores every legal move without searching and plays the best one:
//! captures ordered by victim value, promotions, central destination squares
//! and piece development early in the game. Ties are broken by a seeded rng.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bots::bot_trait::ChessBot;
use crate::game_state::board_view::BoardView;
use crate::game_state::chess_types::{square_file, square_rank, PieceKind, Square};
use crate::host::host_api::HostApi;
use crate::utils::long_algebraic::parse_uci_move;

const CAPTURE_BONUS: i32 = 100;
const CENTER_BONUS: i32 = 15;
const EXTENDED_CENTER_BONUS: i32 = 5;
const DEVELOPMENT_BONUS: i32 = 8;
const OPENING_FULLMOVES: u16 = 10;

pub struct SmartBot {
    rng: StdRng,
}

impl SmartBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    fn victim_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn promotion_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Queen => 90,
            PieceKind::Rook => 50,
            PieceKind::Bishop | PieceKind::Knight => 30,
            PieceKind::Pawn | PieceKind::King => 0,
        }
    }

    #[inline]
    fn is_center(square: Square) -> bool {
        matches!(square, 27 | 28 | 35 | 36)
    }

    #[inline]
    fn is_extended_center(square: Square) -> bool {
        (2..=5).contains(&square_file(square)) && (2..=5).contains(&square_rank(square))
    }

    /// Heuristic score of `uci` on `board`; unparseable text scores 0.
    pub fn score_move(uci: &str, board: &BoardView) -> i32 {
        let Ok(mv) = parse_uci_move(uci) else {
            return 0;
        };

        let mut score = 0;

        if let Some(victim) = board.piece_at(mv.to) {
            score += CAPTURE_BONUS + Self::victim_value(victim.kind) * 10;
        }

        if let Some(promotion) = mv.promotion {
            score += Self::promotion_value(promotion);
        }

        if Self::is_center(mv.to) {
            score += CENTER_BONUS;
        } else if Self::is_extended_center(mv.to) {
            score += EXTENDED_CENTER_BONUS;
        }

        if board.fullmove_number < OPENING_FULLMOVES {
            if let Some(mover) = board.piece_at(mv.from) {
                if mover.kind != PieceKind::Pawn {
                    score += DEVELOPMENT_BONUS;
                }
            }
        }

        score
    }

    /// Best-scoring moves and their score.
    fn best_moves(host: &dyn HostApi) -> (Vec<String>, i32) {
        let moves = host.get_legal_moves();
        if moves.is_empty() {
            return (moves, i32::MIN);
        }

        let board = host.get_board();
        let mut best_value = i32::MIN;
        let mut best = Vec::new();

        for mv in moves {
            let value = Self::score_move(&mv, &board);
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(mv);
            } else if value == best_value {
                best.push(mv);
            }
        }

        (best, best_value)
    }
}

impl Default for SmartBot {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBot for SmartBot {
    fn name(&self) -> String {
        "Smart Bot".to_owned()
    }

    fn description(&self) -> String {
        "Prefers captures, promotions and center control.".to_owned()
    }

    fn on_game_start(&mut self, host: &dyn HostApi) {
        host.log("Smart Bot: ready to play");
    }

    fn select_move(&mut self, host: &dyn HostApi) -> String {
        let (best, score) = Self::best_moves(host);
        match best.choose(&mut self.rng) {
            Some(selected) => {
                host.log(&format!("Smart Bot: {selected} (score {score})"));
                selected.clone()
            }
            None => {
                host.log("Smart Bot: no legal moves");
                String::new()
            }
        }
    }

    fn suggest_move(&self, host: &dyn HostApi) -> String {
        let (best, _) = Self::best_moves(host);
        let mut rng = self.rng.clone();
        best.choose(&mut rng).cloned().unwrap_or_default()
    }
}
