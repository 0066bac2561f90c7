//! Exhaustive minimax search with alpha-beta pruning.
//!
//! Searches to the end of the game, so it is only practical for small games
//! such as tic-tac-toe. Provides a perfect baseline to compare MCTS against.

use treesearch_core::GameState;

/// Perfect-play reference player.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl Minimax {
    /// Create a new minimax player.
    pub fn new() -> Self {
        Self
    }

    /// Get the best action for the player to move.
    ///
    /// Each root action is scored exactly; the first action with the best
    /// score wins. Returns None for terminal states or states without actions.
    pub fn best_action<S: GameState>(&self, state: &S) -> Option<S::Action> {
        if state.is_terminal() {
            return None;
        }

        let mut best: Option<(S::Action, f64)> = None;
        for action in state.possible_actions() {
            let child = state.apply(action);
            let score = -self.negamax(&child, f64::NEG_INFINITY, f64::INFINITY);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((action, score)),
            }
        }

        best.map(|(action, _)| action)
    }

    /// Exact game value from the perspective of the player to move in `state`.
    pub fn value<S: GameState>(&self, state: &S) -> f64 {
        self.negamax(state, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn negamax<S: GameState>(&self, state: &S, mut alpha: f64, beta: f64) -> f64 {
        let actions = state.possible_actions();
        if state.is_terminal() || actions.is_empty() {
            return state.reward() * state.reward_sign();
        }

        let mut best = f64::NEG_INFINITY;
        for action in actions {
            let score = -self.negamax(&state.apply(action), -beta, -alpha);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break; // Cutoff
            }
        }
        best
    }
}
