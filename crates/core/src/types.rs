//! Result classification for finished games.

use std::fmt;

/// Outcome of a finished game, read off the absolute reward convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Positive reward.
    FirstPlayerWin,
    /// Negative reward.
    SecondPlayerWin,
    /// Zero reward.
    Draw,
}

impl Outcome {
    /// Classify a reward by its sign.
    ///
    /// # Example
    /// ```
    /// use treesearch_core::Outcome;
    ///
    /// assert_eq!(Outcome::from_reward(1.0), Outcome::FirstPlayerWin);
    /// assert_eq!(Outcome::from_reward(0.0), Outcome::Draw);
    /// ```
    pub fn from_reward(reward: f64) -> Self {
        if reward > 0.0 {
            Outcome::FirstPlayerWin
        } else if reward < 0.0 {
            Outcome::SecondPlayerWin
        } else {
            Outcome::Draw
        }
    }

    /// Check if this is a draw.
    pub fn is_draw(self) -> bool {
        self == Outcome::Draw
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::FirstPlayerWin => write!(f, "first player wins"),
            Outcome::SecondPlayerWin => write!(f, "second player wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
