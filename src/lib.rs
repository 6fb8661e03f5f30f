//! Crate root module declarations for the Plum Draughts engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, the console front-end and utility helpers) so binaries,
//! tests, and external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod clocks;
    pub mod draughts_rules;
    pub mod draughts_types;
    pub mod game_config;
    pub mod game_state;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_select;
    pub mod engine_trait;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod board_generator;
    pub mod board_parser;
    pub mod engine_match_harness;
    pub mod render_board;
}

