//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.

use treesearch_core::GameState;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Parent links are stored as `Option<NodeId>`, so there is no ownership
/// cycle between a node and its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the MCTS tree.
///
/// Each node owns the game state it represents and the running statistics
/// accumulated for it during search. Children are owned by the arena and
/// listed here in the order of `possible_actions()`.
#[derive(Clone, Debug)]
pub struct Node<S: GameState> {
    pub(crate) state: S,
    pub(crate) parent: Option<NodeId>,
    pub(crate) action: Option<S::Action>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visits: u32,
    pub(crate) total_reward: f64,
}

impl<S: GameState> Node<S> {
    /// Create the root node.
    pub fn root(state: S) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
        }
    }

    /// Create an unvisited child reached from `parent` by `action`.
    pub fn child(parent: NodeId, action: S::Action, state: S) -> Self {
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
        }
    }

    /// Game state at this node.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Parent node (None for root).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that led to this node (None for root).
    pub fn action(&self) -> Option<S::Action> {
        self.action
    }

    /// Children in action order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of times this node was visited during search.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Sum of rewards backpropagated through this node.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// A node without children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Mean reward for this node.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// UCT value of this node as seen from its parent.
    ///
    /// UCT = sign * W / N + C * sqrt(ln(N_parent) / N)
    ///
    /// `sign` turns the absolute mean reward into the selecting player's
    /// value. An unvisited node scores +infinity, so every child is tried
    /// once before any statistic is compared.
    pub fn uct_value(&self, parent_visits: u32, exploration: f64, sign: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let exploitation = sign * self.total_reward / visits;
        let exploration_term = exploration * ((parent_visits as f64).ln() / visits).sqrt();
        exploitation + exploration_term
    }
}
