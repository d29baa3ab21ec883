//! Random-move bot.
//!
//! Picks uniformly among the legal moves. Mostly useful for diagnostics,
//! integration testing and as the weakest opponent.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bots::bot_trait::ChessBot;
use crate::host::host_api::HostApi;

pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(rng: &mut StdRng, host: &dyn HostApi) -> Option<String> {
        host.get_legal_moves().choose(rng).cloned()
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBot for RandomBot {
    fn name(&self) -> String {
        "Random Bot".to_owned()
    }

    fn description(&self) -> String {
        "Picks a random legal move.".to_owned()
    }

    fn on_game_start(&mut self, host: &dyn HostApi) {
        host.log("Random Bot: game started");
    }

    fn select_move(&mut self, host: &dyn HostApi) -> String {
        match Self::pick(&mut self.rng, host) {
            Some(selected) => {
                host.log(&format!("Random Bot: selected {selected}"));
                selected
            }
            None => {
                host.log("Random Bot: no legal moves available");
                String::new()
            }
        }
    }

    fn suggest_move(&self, host: &dyn HostApi) -> String {
        let mut rng = self.rng.clone();
        Self::pick(&mut rng, host).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::RandomBot;
    use crate::bots::bot_trait::ChessBot;
    use crate::game_state::game_state::GameState;
    use crate::host::host_api::{BotLog, HostApi, HostView};

    #[test]
    fn selected_move_is_legal_and_seed_is_reproducible() {
        let game = GameState::new_game();
        let view = HostView::new(&game, "Random Bot", BotLog::new());

        let mut first = RandomBot::with_seed(7);
        let mut second = RandomBot::with_seed(7);
        let picked = first.select_move(&view);

        assert!(view.get_legal_moves().contains(&picked));
        assert_eq!(picked, second.select_move(&view));
    }

    #[test]
    fn suggestion_does_not_advance_the_rng() {
        let game = GameState::new_game();
        let view = HostView::new(&game, "Random Bot", BotLog::new());
        let mut bot = RandomBot::with_seed(11);

        let hint = bot.suggest_move(&view);
        assert_eq!(hint, bot.suggest_move(&view));
        assert_eq!(hint, bot.select_move(&view));
    }

    #[test]
    fn no_moves_gives_empty_string() {
        let mated = GameState::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let log = BotLog::new();
        let view = HostView::new(&mated, "Random Bot", log.clone());

        assert_eq!(RandomBot::with_seed(1).select_move(&view), "");
        assert_eq!(log.records().len(), 1);
    }
}
