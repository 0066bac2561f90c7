use crate::{Result, TreeSearchError};
use std::fmt::Debug;
use std::hash::Hash;

/// An immutable position of a two-player, zero-sum, perfect-information game.
///
/// A state knows whose turn it is. Applying an action never mutates the
/// receiver; it returns the successor state, so any number of search nodes
/// may hold ancestor states at once.
///
/// Rewards use one absolute convention per game: positive values favour the
/// first player, negative values the second. The engine adds the same scalar
/// to every ancestor during backpropagation, so the sign must not depend on
/// whose turn a state represents.
pub trait GameState: Clone {
    /// A game action (e.g. a tic-tac-toe cell)
    type Action: Copy + Eq + Hash + Debug;

    /// Returns all legal actions from this state, in a stable order.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (immutable operation).
    ///
    /// The action must come from `possible_actions()` on this same state;
    /// anything else is implementation-defined. Use [`GameState::try_apply`]
    /// for untrusted input.
    fn apply(&self, action: Self::Action) -> Self;

    /// Returns true if no further play is possible (win, loss or draw).
    fn is_terminal(&self) -> bool;

    /// Returns the reward of this state in the game's absolute convention:
    /// - `1.0` first player won
    /// - `-1.0` second player won
    /// - `0.0` draw, or no decisive result yet
    fn reward(&self) -> f64;

    /// Sign that turns `reward()` into the value for the player to move.
    ///
    /// `1.0` when positive rewards favour the player to move, `-1.0`
    /// otherwise. Games with a single fixed perspective keep the default.
    fn reward_sign(&self) -> f64 {
        1.0
    }

    /// Returns true if `action` is one of `possible_actions()`.
    fn is_legal(&self, action: Self::Action) -> bool {
        self.possible_actions().contains(&action)
    }

    /// Applies an action after checking it against the legal action set.
    ///
    /// # Errors
    /// - `TreeSearchError::GameOver` if the state is terminal
    /// - `TreeSearchError::IllegalAction` if the action is not legal here
    fn try_apply(&self, action: Self::Action) -> Result<Self> {
        if self.is_terminal() {
            return Err(TreeSearchError::GameOver);
        }
        if !self.is_legal(action) {
            return Err(TreeSearchError::IllegalAction(format!("{:?}", action)));
        }
        Ok(self.apply(action))
    }
}
