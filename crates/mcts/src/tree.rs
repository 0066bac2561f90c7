//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. Parent links
//! are plain indices, so climbing the tree never borrows two nodes at once.

use crate::config::{MctsConfig, Perspective};
use crate::node::{Node, NodeId};
use treesearch_core::GameState;

/// Arena-allocated search tree rooted at the searched position.
///
/// The tree owns every node; nodes own their states. Select and
/// backpropagate are iterative, so depth is bounded only by game length.
#[derive(Clone, Debug)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<Node<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree holding only the root state.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![Node::root(root_state)],
        }
    }

    /// Root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get the root node.
    pub fn root_node(&self) -> &Node<S> {
        self.get(NodeId::ROOT)
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node IDs in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Children of a node paired with their nodes, in action order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node<S>)> + '_ {
        self.get(id)
            .children
            .iter()
            .map(move |&child_id| (child_id, self.get(child_id)))
    }

    /// Descend from `from` to a leaf, taking the child with the highest UCT
    /// value at each internal node.
    ///
    /// Ties go to the first child in action order. Selecting from a leaf
    /// returns the leaf itself.
    pub fn select(&self, from: NodeId, config: &MctsConfig) -> NodeId {
        let root_sign = self.root_node().state.reward_sign();
        let mut current = from;

        loop {
            let node = self.get(current);
            if node.is_leaf() {
                return current;
            }

            let sign = match config.perspective {
                Perspective::RootPlayer => root_sign,
                Perspective::PlayerToMove => node.state.reward_sign(),
            };

            let mut best_child = node.children[0];
            let mut best_value = f64::NEG_INFINITY;
            for &child_id in &node.children {
                let value = self
                    .get(child_id)
                    .uct_value(node.visits, config.exploration, sign);
                if value > best_value {
                    best_value = value;
                    best_child = child_id;
                }
            }
            current = best_child;
        }
    }

    /// Grow a leaf by one ply: one unvisited child per legal action, in the
    /// order `possible_actions()` returns them.
    ///
    /// Returns the number of children created. A node that already has
    /// children, or whose state offers no actions, is left unchanged.
    pub fn expand(&mut self, id: NodeId) -> usize {
        if !self.get(id).is_leaf() {
            return 0;
        }

        let parent_state = self.get(id).state.clone();
        let actions = parent_state.possible_actions();

        for &action in &actions {
            let child = Node::child(id, action, parent_state.apply(action));
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(child);
            self.get_mut(id).children.push(child_id);
        }

        actions.len()
    }

    /// Add one visit and `reward` to `from` and every ancestor up to the root.
    ///
    /// The same scalar is added at every level; no sign flip per ply.
    pub fn backpropagate(&mut self, from: NodeId, reward: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.total_reward += reward;
            current = node.parent;
        }
    }

    /// Most-visited child of a node; the first one wins ties.
    ///
    /// Returns None if the node has no children.
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for (child_id, child) in self.children_of(id) {
            match best {
                Some((_, visits)) if child.visits <= visits => {}
                _ => best = Some((child_id, child.visits)),
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Action leading to the most-visited root child.
    pub fn best_action(&self) -> Option<S::Action> {
        self.best_child(NodeId::ROOT)
            .and_then(|id| self.get(id).action)
    }

    /// State of the most-visited root child: the position to continue from.
    pub fn best_state(&self) -> Option<&S> {
        self.best_child(NodeId::ROOT).map(|id| &self.get(id).state)
    }

    /// Expected line of play: follow the most-visited child from the root
    /// while children have been visited.
    pub fn principal_variation(&self) -> Vec<S::Action> {
        let mut line = Vec::new();
        let mut current = NodeId::ROOT;

        while let Some(child_id) = self.best_child(current) {
            let child = self.get(child_id);
            if child.visits == 0 {
                break;
            }
            if let Some(action) = child.action {
                line.push(action);
            }
            current = child_id;
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three-way branch then stop: root offers actions 0..3, every child is terminal.
    #[derive(Clone, Debug, PartialEq)]
    struct Branch {
        picked: Option<u8>,
    }

    impl GameState for Branch {
        type Action = u8;

        fn possible_actions(&self) -> Vec<u8> {
            match self.picked {
                None => vec![0, 1, 2],
                Some(_) => Vec::new(),
            }
        }

        fn apply(&self, action: u8) -> Self {
            Branch {
                picked: Some(action),
            }
        }

        fn is_terminal(&self) -> bool {
            self.picked.is_some()
        }

        fn reward(&self) -> f64 {
            match self.picked {
                Some(2) => 1.0,
                _ => 0.0,
            }
        }
    }

    fn tree() -> SearchTree<Branch> {
        SearchTree::new(Branch { picked: None })
    }

    #[test]
    fn test_tree_creation() {
        let tree = tree();
        assert_eq!(tree.len(), 1); // Root node
        assert!(!tree.is_empty());
        assert!(tree.root_node().is_leaf());
    }

    #[test]
    fn test_expand_creates_children_in_action_order() {
        let mut tree = tree();
        assert_eq!(tree.expand(NodeId::ROOT), 3);
        assert_eq!(tree.len(), 4);

        let actions: Vec<u8> = tree
            .children_of(NodeId::ROOT)
            .map(|(_, child)| child.action().unwrap())
            .collect();
        assert_eq!(actions, vec![0, 1, 2]);

        for (_, child) in tree.children_of(NodeId::ROOT) {
            assert_eq!(child.parent(), Some(NodeId::ROOT));
            assert_eq!(child.visits(), 0);
            assert_eq!(child.total_reward(), 0.0);
        }
    }

    #[test]
    fn test_expand_is_noop_on_internal_node_and_terminal_leaf() {
        let mut tree = tree();
        tree.expand(NodeId::ROOT);

        // Already expanded
        assert_eq!(tree.expand(NodeId::ROOT), 0);
        assert_eq!(tree.len(), 4);

        // Terminal leaf has no actions
        let child = tree.root_node().children()[0];
        assert_eq!(tree.expand(child), 0);
        assert!(tree.get(child).is_leaf());
    }

    #[test]
    fn test_select_on_leaf_returns_itself() {
        let tree = tree();
        assert_eq!(tree.select(NodeId::ROOT, &MctsConfig::default()), NodeId::ROOT);
    }

    #[test]
    fn test_select_prefers_unvisited_then_first() {
        let mut tree = tree();
        tree.expand(NodeId::ROOT);
        let children = tree.root_node().children().to_vec();
        let config = MctsConfig::default();

        // All unvisited: first child wins the tie
        assert_eq!(tree.select(NodeId::ROOT, &config), children[0]);

        tree.backpropagate(children[0], 1.0);
        // Remaining unvisited children outrank any visited one
        assert_eq!(tree.select(NodeId::ROOT, &config), children[1]);
    }

    #[test]
    fn test_select_exploits_with_sign() {
        let mut tree = tree();
        tree.expand(NodeId::ROOT);
        let children = tree.root_node().children().to_vec();

        tree.backpropagate(children[0], -1.0);
        tree.backpropagate(children[1], 0.0);
        tree.backpropagate(children[2], 1.0);

        let config = MctsConfig::default();
        assert_eq!(tree.select(NodeId::ROOT, &config), children[2]);

        // Zero exploration: pure exploitation
        let greedy = MctsConfig {
            exploration: 0.0,
            ..Default::default()
        };
        assert_eq!(tree.select(NodeId::ROOT, &greedy), children[2]);
    }

    #[test]
    fn test_backpropagate_adds_raw_reward_to_every_ancestor() {
        let mut tree = tree();
        tree.expand(NodeId::ROOT);
        let child = tree.root_node().children()[2];

        tree.backpropagate(child, 1.0);
        tree.backpropagate(child, 1.0);

        assert_eq!(tree.get(child).visits(), 2);
        assert_eq!(tree.get(child).total_reward(), 2.0);
        assert_eq!(tree.root_node().visits(), 2);
        assert_eq!(tree.root_node().total_reward(), 2.0);
    }

    #[test]
    fn test_best_child_first_on_ties() {
        let mut tree = tree();
        assert_eq!(tree.best_child(NodeId::ROOT), None);
        assert_eq!(tree.best_action(), None);

        tree.expand(NodeId::ROOT);
        let children = tree.root_node().children().to_vec();
        tree.backpropagate(children[1], 0.0);
        tree.backpropagate(children[2], 1.0);

        assert_eq!(tree.best_child(NodeId::ROOT), Some(children[1]));
        assert_eq!(tree.best_action(), Some(1));
        assert_eq!(tree.best_state(), Some(&Branch { picked: Some(1) }));
    }

    #[test]
    fn test_principal_variation() {
        let mut tree = tree();
        assert!(tree.principal_variation().is_empty());

        tree.expand(NodeId::ROOT);
        let children = tree.root_node().children().to_vec();
        tree.backpropagate(children[2], 1.0);
        tree.backpropagate(children[2], 1.0);
        tree.backpropagate(children[0], 0.0);

        assert_eq!(tree.principal_variation(), vec![2]);
    }
}
