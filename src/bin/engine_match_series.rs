//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `RUST_LOG=info cargo run --release --bin engine_match_series`

use tracing_subscriber::EnvFilter;

use plum_draughts::engines::engine_greedy::GreedyEngine;
use plum_draughts::engines::engine_minimax::MinimaxEngine;
use plum_draughts::engines::engine_trait::Engine;
use plum_draughts::errors::DraughtsError;
use plum_draughts::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

fn main() -> Result<(), DraughtsError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Customize these two lines to experiment with different engines/scorers/depths.
    let player1 = || Box::new(MinimaxEngine::new()) as Box<dyn Engine>;
    let player2 = || Box::new(GreedyEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 200,
                opening_min_plies: 2,
                opening_max_plies: 6,
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
