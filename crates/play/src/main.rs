//! Console driver for the MCTS engine.
//!
//! Plays tic-tac-toe against a human, generates self-play games, evaluates
//! the engine against a perfect minimax player and analyzes single positions.

mod analyze;
mod console;
mod engine;
mod evaluate;
mod selfplay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::EngineArgs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use treesearch_mcts::games::{Player, TicTacToeState};

/// Monte Carlo Tree Search tic-tac-toe.
#[derive(Parser)]
#[command(name = "treesearch")]
#[command(about = "Play, self-play, evaluate and analyze tic-tac-toe with MCTS")]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, env = "TREESEARCH_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the engine.
    Play {
        /// Side the human plays (x or o).
        #[arg(long, default_value = "o")]
        human: Player,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Generate engine-vs-engine games.
    Selfplay {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Write game records as JSON lines to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Evaluate the engine against the perfect minimax player.
    Evaluate {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Search one position and print the root statistics.
    Analyze {
        /// Board as nine cells of X, O or '.', e.g. "XX./OO./...".
        #[arg(short, long, default_value = ".........")]
        board: String,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Install the fmt subscriber on stderr so stdout carries only the game.
fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {}", level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn cmd_play(human: Player, engine: &EngineArgs) -> Result<()> {
    let mcts = engine.build::<TicTacToeState>(engine.seed)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    console::play_game(&mcts, human, &mut input, &mut output)?;
    Ok(())
}

fn cmd_selfplay(games: usize, output: Option<PathBuf>, engine: &EngineArgs) -> Result<()> {
    println!(
        "Playing {} self-play games with {} iterations/move ({:?} evaluator, {} perspective)",
        games, engine.iterations, engine.evaluator, engine.perspective
    );

    let start = Instant::now();
    let records = selfplay::generate(engine, games)?;
    let elapsed = start.elapsed();

    if let Some(path) = &output {
        selfplay::write_records(path, &records)?;
        info!(path = ?path, games = records.len(), "game records written");
        println!("Records saved to: {:?}", path);
    }

    let tally = selfplay::Tally::from_records(&records);
    let total_moves: usize = records.iter().map(|r| r.moves.len()).sum();

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    if games > 0 {
        println!(
            "Average game length: {:.1} moves",
            total_moves as f64 / games as f64
        );
    }
    println!(
        "Outcomes: X wins: {}, O wins: {}, Draws: {}",
        tally.x_wins, tally.o_wins, tally.draws
    );

    Ok(())
}

fn cmd_evaluate(games: usize, engine: &EngineArgs) -> Result<()> {
    println!(
        "Playing {} games: MCTS ({} iterations) vs Minimax",
        games, engine.iterations
    );
    println!("================================================");

    let result = evaluate::run_evaluation(engine, games)?;

    println!("\nResults:");
    println!("  MCTS wins:    {}", result.engine_wins);
    println!("  Minimax wins: {}", result.minimax_wins);
    println!("  Draws:        {}", result.draws);
    println!("  Non-loss rate: {:.1}%", result.non_loss_rate() * 100.0);

    Ok(())
}

fn cmd_analyze(board: &str, engine: &EngineArgs) -> Result<()> {
    let state: TicTacToeState = board
        .parse()
        .with_context(|| format!("Invalid board: {:?}", board))?;
    analyze::report(engine, &state, &mut io::stdout().lock())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Play { human, engine } => cmd_play(human, &engine),
        Commands::Selfplay {
            games,
            output,
            engine,
        } => cmd_selfplay(games, output, &engine),
        Commands::Evaluate { games, engine } => cmd_evaluate(games, &engine),
        Commands::Analyze { board, engine } => cmd_analyze(&board, &engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use engine::EvaluatorKind;
    use treesearch_mcts::Perspective;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play_defaults() {
        let cli = Cli::try_parse_from(["treesearch", "play"]).unwrap();
        match cli.command {
            Commands::Play { human, engine } => {
                assert_eq!(human, Player::O);
                assert_eq!(engine.evaluator, EvaluatorKind::Direct);
                assert_eq!(engine.perspective, Perspective::RootPlayer);
                assert_eq!(engine.seed, 42);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_parse_engine_flags() {
        let cli = Cli::try_parse_from([
            "treesearch",
            "selfplay",
            "--games",
            "3",
            "--iterations",
            "200",
            "--perspective",
            "to-move",
            "--evaluator",
            "rollout",
            "--rollout-depth",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Selfplay { games, engine, .. } => {
                assert_eq!(games, 3);
                assert_eq!(engine.iterations, 200);
                assert_eq!(engine.perspective, Perspective::PlayerToMove);
                assert_eq!(engine.evaluator, EvaluatorKind::Rollout);
                assert_eq!(engine.rollout_depth, Some(4));
            }
            _ => panic!("expected selfplay"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_perspective() {
        let result = Cli::try_parse_from(["treesearch", "analyze", "--perspective", "sideways"]);
        assert!(result.is_err());
    }
}
