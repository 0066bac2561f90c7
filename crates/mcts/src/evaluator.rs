//! Evaluation abstraction for MCTS.
//!
//! The `Evaluator` trait allows swapping between different evaluation strategies:
//! - `DirectEvaluator` reads the reward straight off the selected state
//! - `RolloutEvaluator` plays random moves to the end of the game first

use rand::Rng;
use std::cell::RefCell;
use treesearch_core::GameState;

/// Trait for evaluating game positions.
///
/// The returned reward uses the game's absolute convention (positive favours
/// the first player); the engine backpropagates it unchanged.
pub trait Evaluator<S: GameState> {
    /// Evaluate a position, returning a reward estimate.
    fn evaluate(&self, state: &S) -> f64;
}

impl<S: GameState, E: Evaluator<S> + ?Sized> Evaluator<S> for &E {
    fn evaluate(&self, state: &S) -> f64 {
        (**self).evaluate(state)
    }
}

impl<S: GameState, E: Evaluator<S> + ?Sized> Evaluator<S> for Box<E> {
    fn evaluate(&self, state: &S) -> f64 {
        (**self).evaluate(state)
    }
}

/// Evaluator returning `state.reward()` with no simulation phase.
///
/// Non-terminal states therefore contribute whatever the game reports for
/// them (0 for tic-tac-toe).
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectEvaluator;

impl<S: GameState> Evaluator<S> for DirectEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.reward()
    }
}

/// Evaluator using uniformly random playouts.
///
/// Plays random legal actions from the position until the game ends (or the
/// optional depth cap is reached) and returns the reward of the final state.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Maximum moves in a playout; None plays to the end.
    max_depth: Option<usize>,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create an evaluator that plays every rollout to a terminal state.
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_depth: None,
        }
    }

    /// Create an evaluator whose rollouts stop after `max_depth` moves.
    pub fn with_max_depth(rng: R, max_depth: usize) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_depth: Some(max_depth),
        }
    }

    /// Perform a random rollout from the given state.
    fn rollout<S: GameState>(&self, initial_state: &S) -> f64 {
        let mut state = initial_state.clone();
        let mut depth = 0;

        while !state.is_terminal() && self.max_depth.map_or(true, |max| depth < max) {
            let actions = state.possible_actions();
            if actions.is_empty() {
                break;
            }

            let idx = self.rng.borrow_mut().gen_range(0..actions.len());
            state = state.apply(actions[idx]);
            depth += 1;
        }

        state.reward()
    }
}

impl<S: GameState, R: Rng> Evaluator<S> for RolloutEvaluator<R> {
    fn evaluate(&self, state: &S) -> f64 {
        self.rollout(state)
    }
}
