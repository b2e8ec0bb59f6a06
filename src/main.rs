//! Checkers-Rust: a checkers rules engine with a text console.
//!
//! ## Usage
//!
//! - `checkers-rust` - Play in the console on an 8x8 board
//! - `checkers-rust play --size 10 --rows 4` - Play on a custom board
//! - `checkers-rust demo` - Show a short scripted game
//!
//! Set `RUST_LOG=debug` to see engine decisions on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use checkers_rust::board::Coord;
use checkers_rust::console::Console;
use checkers_rust::constants::{DEFAULT_BOARD_SIZE, DEFAULT_STARTING_ROWS};
use checkers_rust::game::{Game, GameConfig, format_sequence};

/// Checkers-Rust: a two-player checkers rules engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a two-player game in the console
    Play(BoardArgs),
    /// Play a short scripted game and print each position
    Demo,
}

#[derive(Args)]
struct BoardArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Rows of pieces per side
    #[arg(long, default_value_t = DEFAULT_STARTING_ROWS)]
    rows: usize,
}

impl From<&BoardArgs> for GameConfig {
    fn from(args: &BoardArgs) -> Self {
        GameConfig {
            size: args.size,
            starting_rows: args.rows,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => play(GameConfig::from(&args)),
        None => play(GameConfig::default()),
        Some(Commands::Demo) => run_demo(),
    }
}

fn play(config: GameConfig) -> Result<()> {
    let game = Game::with_config(config).context("invalid board configuration")?;
    info!(
        "starting {0}x{0} game with {1} rows per side",
        config.size, config.starting_rows
    );
    Console::new(game)
        .run()
        .context("console I/O failed")
}

/// Opening where Black trades a piece and Red answers with a capture.
const DEMO_MOVES: &[&[(i32, i32)]] = &[
    &[(3, 5), (4, 4)],
    &[(2, 2), (3, 3)],
    &[(4, 4), (2, 2)],
    &[(1, 1), (3, 3)],
];

fn run_demo() -> Result<()> {
    println!("Checkers-Rust: scripted opening\n");

    let mut game = Game::new();
    println!("{}", game.board());
    for mv in DEMO_MOVES {
        let sequence: Vec<Coord> = mv.iter().copied().map(Coord::from).collect();
        let player = game.current_player();
        let report = game
            .submit_move(&sequence)
            .with_context(|| format!("demo move {} failed", format_sequence(&sequence)))?;
        println!(
            "{player}: {} ({} captured)",
            format_sequence(&sequence),
            report.captured.len()
        );
        println!("{}", game.board());
    }
    Ok(())
}
