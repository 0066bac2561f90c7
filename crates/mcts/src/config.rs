//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search algorithm.

use std::fmt;
use std::str::FromStr;
use treesearch_core::{Result, TreeSearchError};

/// Standard UCT exploration constant (≈ √2).
pub const DEFAULT_EXPLORATION: f64 = 1.41;

/// Default iteration budget per search.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Whose point of view selection takes at each internal node.
///
/// Backpropagation always adds the raw reward to every ancestor; the
/// perspective only decides the sign applied to a child's mean reward
/// inside the UCT formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Perspective {
    /// Every node maximises the reward for the player to move at the root.
    #[default]
    RootPlayer,

    /// Every node maximises the reward for its own player to move.
    PlayerToMove,
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Perspective::RootPlayer => write!(f, "root"),
            Perspective::PlayerToMove => write!(f, "to-move"),
        }
    }
}

impl FromStr for Perspective {
    type Err = TreeSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" | "root-player" => Ok(Perspective::RootPlayer),
            "to-move" | "player-to-move" => Ok(Perspective::PlayerToMove),
            other => Err(TreeSearchError::InvalidConfig(format!(
                "unknown perspective '{}' (expected 'root' or 'to-move')",
                other
            ))),
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of Select → Expand → Evaluate → Backpropagate cycles per search.
    pub iterations: usize,

    /// UCT exploration constant `C`.
    /// Higher values favour under-visited children.
    pub exploration: f64,

    /// Sign convention used during selection.
    pub perspective: Perspective,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration: DEFAULT_EXPLORATION,
            perspective: Perspective::RootPlayer,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a config where each node plays for its own player to move.
    pub fn adversarial(iterations: usize) -> Self {
        Self {
            iterations,
            perspective: Perspective::PlayerToMove,
            ..Default::default()
        }
    }

    /// Check the parameters before a search uses them.
    ///
    /// # Errors
    /// Returns `TreeSearchError::InvalidConfig` if the exploration constant
    /// is negative, NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(TreeSearchError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}
