//! Game implementations searched by the engine.
//!
//! Tic-tac-toe is small enough to solve exactly, which makes it the
//! reference instance for checking search behaviour.

pub mod tictactoe;

pub use tictactoe::{Player, TicTacToeAction, TicTacToeState};
