use std::time::Duration;

/// What the host does after a bot violates the protocol on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// The violating side loses the game.
    Forfeit,
    /// Ask the bot again, up to `max_retries` extra times, then forfeit.
    Retry,
    /// Play the first legal move on the bot's behalf.
    #[default]
    SubstituteFirstLegal,
}

#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Wall-clock limit for one `select_move` call.
    pub move_time_budget: Duration,
    pub fallback: FallbackPolicy,
    pub max_retries: u8,
    /// Bot-vs-bot games stop as unfinished after this many plies.
    pub max_plies: u16,
    /// Base seed for color assignment in match series.
    pub seed: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            move_time_budget: Duration::from_secs(2),
            fallback: FallbackPolicy::default(),
            max_retries: 1,
            max_plies: 400,
            seed: 0,
        }
    }
}
