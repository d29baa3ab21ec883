//! Crate root module declarations for the chess bot host.
//!
//! Exposes the rules engine (board model, move generation, FEN), the bot
//! plugin boundary and host, the game session and the console driver so the
//! binaries, benches and tests import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board_view;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_result;
    pub mod game_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod move_descriptions;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod game_outcome;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_executor;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod bots {
    pub mod bot_random;
    pub mod bot_smart;
    pub mod bot_trait;
}

pub mod host {
    pub mod bot_host;
    pub mod bot_match;
    pub mod game_session;
    pub mod host_api;
    pub mod host_config;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
