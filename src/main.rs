use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_draughts::console::console_top::run_stdio_loop;
use plum_draughts::game_state::draughts_rules::AI_THINK_TIME;
use plum_draughts::game_state::draughts_types::{Difficulty, GameMode, Player};
use plum_draughts::game_state::game_config::GameConfig;

#[derive(Parser, Debug)]
#[command(
    name = "plum_draughts",
    version,
    about = "Play English draughts against the computer or a friend"
)]
struct Cli {
    /// AI tier: beginner, intermediate or advanced
    #[arg(long, short, default_value = "intermediate")]
    difficulty: Difficulty,
    /// Colour the AI plays
    #[arg(long, default_value = "black", conflicts_with = "two_player")]
    ai: Player,
    /// Two humans share the board; no AI
    #[arg(long)]
    two_player: bool,
    /// Pause before the AI commits its move, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = AI_THINK_TIME.as_millis() as u64)]
    think_time_ms: u64,
    /// Log search and game events to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.two_player {
        GameMode::VsHuman
    } else {
        GameMode::VsAi { ai_player: cli.ai }
    };
    let config = GameConfig {
        mode,
        difficulty: cli.difficulty,
        think_time: Duration::from_millis(cli.think_time_ms),
    };

    run_stdio_loop(config)
}
