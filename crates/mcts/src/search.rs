//! Monte Carlo Tree Search implementation.
//!
//! Each iteration runs Select → Expand → Evaluate → Backpropagate over an
//! arena tree rooted at the searched position, for a fixed iteration budget.

use crate::{
    config::MctsConfig,
    evaluator::{DirectEvaluator, Evaluator},
    tree::SearchTree,
};
use std::marker::PhantomData;
use tracing::{debug, trace};
use treesearch_core::{GameState, Result};

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<A> {
    /// Action leading to the child.
    pub action: A,

    /// Visits accumulated by the child.
    pub visits: u32,

    /// Sum of rewards backpropagated through the child.
    pub total_reward: f64,
}

impl<A> ChildStats<A> {
    /// Mean reward, 0.0 for an unvisited child.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    /// One entry per root child, in action order.
    pub children: Vec<ChildStats<A>>,

    /// Most-visited action (first on ties); None if the root has no children.
    pub best_action: Option<A>,

    /// Visits at the root (equals the iterations run).
    pub root_visits: u32,

    /// Sum of all rewards evaluated during the search.
    pub root_reward: f64,
}

impl<A: Copy> SearchResult<A> {
    /// Visit count for each root action.
    pub fn visit_counts(&self) -> Vec<(A, u32)> {
        self.children
            .iter()
            .map(|child| (child.action, child.visits))
            .collect()
    }

    /// Visit distribution over root actions.
    ///
    /// Sums to 1.0 whenever any root child was visited; all zeros otherwise.
    pub fn policy(&self) -> Vec<(A, f64)> {
        let total: u32 = self.children.iter().map(|child| child.visits).sum();
        self.children
            .iter()
            .map(|child| {
                let prob = if total == 0 {
                    0.0
                } else {
                    child.visits as f64 / total as f64
                };
                (child.action, prob)
            })
            .collect()
    }
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Generic over:
/// - `S`: The game state being searched
/// - `E`: The evaluation strategy (direct reward or random rollouts)
pub struct Mcts<S: GameState, E: Evaluator<S> = DirectEvaluator> {
    config: MctsConfig,
    evaluator: E,
    _state: PhantomData<fn() -> S>,
}

impl<S: GameState> Mcts<S, DirectEvaluator> {
    /// Create an engine that evaluates states by their own reward.
    ///
    /// # Errors
    /// Returns `TreeSearchError::InvalidConfig` if the config fails validation.
    pub fn with_config(config: MctsConfig) -> Result<Self> {
        Self::new(config, DirectEvaluator)
    }
}

impl<S, E> Mcts<S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    /// Create a new MCTS instance.
    ///
    /// # Errors
    /// Returns `TreeSearchError::InvalidConfig` if the config fails validation.
    pub fn new(config: MctsConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            _state: PhantomData,
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Evaluator used for rewards.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run `config.iterations` iterations from `root_state` and return the
    /// resulting tree. A budget of zero returns a bare, unvisited root.
    pub fn run(&self, root_state: S) -> SearchTree<S> {
        let mut tree = SearchTree::new(root_state);

        for iteration in 0..self.config.iterations {
            self.iterate(&mut tree, iteration);
        }

        debug!(
            iterations = self.config.iterations,
            nodes = tree.len(),
            root_visits = tree.root_node().visits(),
            root_reward = tree.root_node().total_reward(),
            best_action = ?tree.best_action(),
            "search finished"
        );

        tree
    }

    /// Run a search and summarise the root children.
    pub fn search(&self, root_state: S) -> SearchResult<S::Action> {
        let tree = self.run(root_state);
        summarize(&tree)
    }

    /// One cycle: select a leaf, grow it, evaluate, backpropagate.
    fn iterate(&self, tree: &mut SearchTree<S>, iteration: usize) {
        // SELECT: descend via UCT to a leaf of the current tree
        let leaf = tree.select(tree.root(), &self.config);

        // EXPAND: grow one ply unless the game is over here
        if !tree.get(leaf).state().is_terminal() {
            tree.expand(leaf);
        }

        // Re-select from the leaf: first unvisited child if it grew,
        // the leaf itself otherwise
        let target = tree.select(leaf, &self.config);

        // EVALUATE and BACKPROPAGATE
        let reward = self.evaluator.evaluate(tree.get(target).state());
        tree.backpropagate(target, reward);

        trace!(
            iteration,
            leaf = leaf.index(),
            target = target.index(),
            reward,
            "iteration"
        );
    }
}

/// Run `iterations` iterations with the default configuration and direct
/// reward evaluation, returning the search tree.
pub fn run<S: GameState>(root_state: S, iterations: usize) -> SearchTree<S> {
    let engine: Mcts<S> = Mcts {
        config: MctsConfig::with_iterations(iterations),
        evaluator: DirectEvaluator,
        _state: PhantomData,
    };
    engine.run(root_state)
}

/// Extract root-child statistics from a finished tree.
pub fn summarize<S: GameState>(tree: &SearchTree<S>) -> SearchResult<S::Action> {
    let children = tree
        .children_of(tree.root())
        .filter_map(|(_, child)| {
            child.action().map(|action| ChildStats {
                action,
                visits: child.visits(),
                total_reward: child.total_reward(),
            })
        })
        .collect();

    let root = tree.root_node();
    SearchResult {
        children,
        best_action: tree.best_action(),
        root_visits: root.visits(),
        root_reward: root.total_reward(),
    }
}
