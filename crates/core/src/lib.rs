//! Tree Search Core - Game abstractions and common types
//!
//! This crate provides the [`GameState`] trait that defines the interface
//! any game must implement to be searched by the MCTS engine.
//!
//! # Types
//!
//! - [`GameState`] - Trait for immutable game positions
//! - [`Outcome`] - Classification of a terminal reward
//! - [`TreeSearchError`] - Errors raised at validated entry points

mod error;
mod game;
mod types;

pub use error::{Result, TreeSearchError};
pub use game::GameState;
pub use types::Outcome;
