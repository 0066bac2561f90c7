//! Evaluation against the perfect minimax player.

use crate::engine::EngineArgs;
use anyhow::{Context, Result};
use tracing::info;
use treesearch_core::GameState;
use treesearch_mcts::{
    games::{Player, TicTacToeState},
    Minimax,
};

/// Engine results over a match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    pub engine_wins: usize,
    pub minimax_wins: usize,
    pub draws: usize,
    pub total_games: usize,
}

impl EvaluationResult {
    /// Fraction of games the engine did not lose.
    pub fn non_loss_rate(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        (self.engine_wins + self.draws) as f64 / self.total_games as f64
    }
}

/// Play one game, the engine moving as `engine_side`. Returns the final state.
pub fn play_evaluation_game(
    args: &EngineArgs,
    engine_side: Player,
    seed: u64,
) -> Result<TicTacToeState> {
    let mcts = args.build::<TicTacToeState>(seed)?;
    let minimax = Minimax::new();
    let mut state = TicTacToeState::new();

    while !state.is_terminal() {
        let action = if state.current_player() == engine_side {
            mcts.run(state.clone()).best_action()
        } else {
            minimax.best_action(&state)
        };
        let action = action.context("No move available in a running game")?;

        state = state.apply(action);
    }

    Ok(state)
}

/// Play `games` games, the engine alternating between X and O.
pub fn run_evaluation(args: &EngineArgs, games: usize) -> Result<EvaluationResult> {
    let mut result = EvaluationResult {
        total_games: games,
        ..Default::default()
    };

    for i in 0..games {
        // Alternate sides for fairness
        let engine_side = if i % 2 == 0 { Player::X } else { Player::O };
        let game_seed = args.seed.wrapping_add(i as u64 * 1000);

        let state = play_evaluation_game(args, engine_side, game_seed)?;
        match state.winner() {
            Some(winner) if winner == engine_side => result.engine_wins += 1,
            Some(_) => result.minimax_wins += 1,
            None => result.draws += 1,
        }

        info!(
            game = i + 1,
            engine_side = %engine_side,
            engine_wins = result.engine_wins,
            minimax_wins = result.minimax_wins,
            draws = result.draws,
            "evaluation game finished"
        );
    }

    Ok(result)
}
