//! Engine construction from command-line flags.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use treesearch_core::GameState;
use treesearch_mcts::{
    DirectEvaluator, Evaluator, Mcts, MctsConfig, Perspective, RolloutEvaluator,
    DEFAULT_EXPLORATION, DEFAULT_ITERATIONS,
};

/// How leaf positions are scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvaluatorKind {
    /// Read the reward straight off the selected state.
    Direct,
    /// Play uniformly random moves to the end of the game.
    Rollout,
}

/// Search flags shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct EngineArgs {
    /// MCTS iterations per move.
    #[arg(short, long, env = "TREESEARCH_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// UCT exploration constant.
    #[arg(long, env = "TREESEARCH_EXPLORATION", default_value_t = DEFAULT_EXPLORATION)]
    pub exploration: f64,

    /// Whose point of view selection maximises (root, to-move).
    #[arg(long, env = "TREESEARCH_PERSPECTIVE", default_value = "root")]
    pub perspective: Perspective,

    /// Leaf evaluation strategy.
    #[arg(long, value_enum, env = "TREESEARCH_EVALUATOR", default_value = "direct")]
    pub evaluator: EvaluatorKind,

    /// Maximum moves per rollout (only used with --evaluator rollout).
    #[arg(long)]
    pub rollout_depth: Option<usize>,

    /// Random seed for reproducibility.
    #[arg(long, env = "TREESEARCH_SEED", default_value = "42")]
    pub seed: u64,
}

impl EngineArgs {
    /// Engine configuration described by the flags.
    pub fn config(&self) -> MctsConfig {
        MctsConfig {
            iterations: self.iterations,
            exploration: self.exploration,
            perspective: self.perspective,
        }
    }

    /// Build an engine whose rollouts (if any) are seeded with `seed`.
    pub fn build<S: GameState>(&self, seed: u64) -> Result<Mcts<S, EngineEvaluator>> {
        let evaluator = match self.evaluator {
            EvaluatorKind::Direct => EngineEvaluator::Direct(DirectEvaluator),
            EvaluatorKind::Rollout => {
                let rng = ChaCha8Rng::seed_from_u64(seed);
                let rollout = match self.rollout_depth {
                    Some(depth) => RolloutEvaluator::with_max_depth(rng, depth),
                    None => RolloutEvaluator::new(rng),
                };
                EngineEvaluator::Rollout(rollout)
            }
        };
        Mcts::new(self.config(), evaluator).context("Invalid engine configuration")
    }
}

/// Evaluator chosen at runtime.
pub enum EngineEvaluator {
    Direct(DirectEvaluator),
    Rollout(RolloutEvaluator<ChaCha8Rng>),
}

impl<S: GameState> Evaluator<S> for EngineEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        match self {
            EngineEvaluator::Direct(direct) => direct.evaluate(state),
            EngineEvaluator::Rollout(rollout) => rollout.evaluate(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treesearch_mcts::games::TicTacToeState;

    fn args(evaluator: EvaluatorKind) -> EngineArgs {
        EngineArgs {
            iterations: 50,
            exploration: DEFAULT_EXPLORATION,
            perspective: Perspective::PlayerToMove,
            evaluator,
            rollout_depth: None,
            seed: 7,
        }
    }

    #[test]
    fn test_config_from_flags() {
        let config = args(EvaluatorKind::Direct).config();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.perspective, Perspective::PlayerToMove);
    }

    #[test]
    fn test_build_both_evaluators() {
        for kind in [EvaluatorKind::Direct, EvaluatorKind::Rollout] {
            let engine = args(kind).build::<TicTacToeState>(1).unwrap();
            let tree = engine.run(TicTacToeState::new());
            assert_eq!(tree.root_node().visits(), 50);
        }
    }

    #[test]
    fn test_build_rejects_negative_exploration() {
        let mut bad = args(EvaluatorKind::Direct);
        bad.exploration = -1.0;
        assert!(bad.build::<TicTacToeState>(0).is_err());
    }
}
