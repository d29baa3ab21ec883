//! Bot abstraction used by the plugin host.
//!
//! A bot names itself, may state a color preference, and answers with
//! coordinate text. Everything it returns is untrusted: the host parses and
//! checks it against the legal-move set before anything changes.

use crate::game_state::chess_types::Color;
use crate::host::host_api::HostApi;

pub trait ChessBot: Send {
    fn name(&self) -> String;

    fn description(&self) -> String;

    /// Advisory; the host may seat the bot on the other side.
    fn preferred_color(&self) -> Option<Color> {
        None
    }

    fn on_game_start(&mut self, _host: &dyn HostApi) {}

    /// Chosen move as coordinate text, or an empty string when there is none.
    fn select_move(&mut self, host: &dyn HostApi) -> String;

    /// Hint for a human player. Must not change the bot's own state.
    fn suggest_move(&self, host: &dyn HostApi) -> String;
}
