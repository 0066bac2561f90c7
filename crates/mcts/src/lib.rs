//! Monte Carlo Tree Search with UCT selection.
//!
//! This crate provides a generic MCTS engine that can be used with
//! any game implementing the `treesearch_core::GameState` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `GameState` implementation
//! - **UCT Selection**: Unvisited children first, then mean reward plus
//!   an exploration bonus
//! - **Arena Tree**: Nodes addressed by index; parent links never own
//! - **Evaluator Abstraction**: Direct reward reads or random rollouts
//! - **Perspective**: Root-player or player-to-move selection over the same
//!   raw backpropagated statistics
//!
//! # Example
//!
//! ```
//! use treesearch_mcts::{games::TicTacToeState, Mcts, MctsConfig};
//!
//! let state = TicTacToeState::new();
//! let mcts = Mcts::with_config(MctsConfig::with_iterations(100)).unwrap();
//!
//! let tree = mcts.run(state);
//! assert_eq!(tree.root_node().visits(), 100);
//! println!("Best action: {:?}", tree.best_action());
//! ```

pub mod config;
pub mod evaluator;
pub mod games;
pub mod minimax;
mod node;
pub mod search;
mod tree;

pub use config::{MctsConfig, Perspective, DEFAULT_EXPLORATION, DEFAULT_ITERATIONS};
pub use evaluator::{DirectEvaluator, Evaluator, RolloutEvaluator};
pub use minimax::Minimax;
pub use node::{Node, NodeId};
pub use search::{run, summarize, ChildStats, Mcts, SearchResult};
pub use tree::SearchTree;
