//! Engine-vs-engine game generation.

use crate::engine::EngineArgs;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use treesearch_core::{GameState, Outcome};
use treesearch_mcts::{games::TicTacToeState, summarize};

/// One move of a recorded game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveRecord {
    /// Player who moved ("X" or "O").
    pub player: String,

    pub row: u8,
    pub col: u8,

    /// Root visit distribution as `[cell, probability]` pairs.
    pub policy: Vec<(u8, f64)>,
}

/// A complete self-play game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Seed of the rollout generator for this game.
    pub seed: u64,

    pub moves: Vec<MoveRecord>,

    /// Final reward: +1 (X wins), -1 (O wins), 0 (draw).
    pub outcome: f64,
}

impl GameRecord {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_reward(self.outcome)
    }
}

/// Outcome counts over a batch of games.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn from_records(records: &[GameRecord]) -> Self {
        records.iter().fold(Self::default(), |mut tally, record| {
            match record.outcome() {
                Outcome::FirstPlayerWin => tally.x_wins += 1,
                Outcome::SecondPlayerWin => tally.o_wins += 1,
                Outcome::Draw => tally.draws += 1,
            }
            tally
        })
    }
}

/// Play one game with the engine choosing every move.
pub fn play_game(args: &EngineArgs, seed: u64) -> Result<GameRecord> {
    let mcts = args.build::<TicTacToeState>(seed)?;
    let mut state = TicTacToeState::new();
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let tree = mcts.run(state.clone());
        let result = summarize(&tree);
        let action = result
            .best_action
            .context("Engine found no move in a running game")?;

        moves.push(MoveRecord {
            player: state.current_player().to_string(),
            row: action.row(),
            col: action.col(),
            policy: result
                .policy()
                .into_iter()
                .map(|(a, p)| (a.0, p))
                .collect(),
        });
        state = state.apply(action);
    }

    debug!(seed, moves = moves.len(), reward = state.reward(), "self-play game finished");

    Ok(GameRecord {
        seed,
        moves,
        outcome: state.reward(),
    })
}

/// Play `games` games in parallel. Game `i` uses seed `seed + i * 1000`.
pub fn generate(args: &EngineArgs, games: usize) -> Result<Vec<GameRecord>> {
    (0..games)
        .into_par_iter()
        .map(|i| play_game(args, args.seed.wrapping_add(i as u64 * 1000)))
        .collect()
}

/// Write records as JSON lines.
pub fn write_records(path: &Path, records: &[GameRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    for (i, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Failed to serialize game {}", i))?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
