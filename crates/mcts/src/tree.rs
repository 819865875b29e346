//! Arena-allocated search tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>> with weak parents.
//! The whole arena is dropped at once when a search returns.

use crate::node::{Node, NodeId};
use pursuit_core::{Action, PursuitState};

/// Arena-allocated search tree.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree whose root holds `state`.
    pub fn new(state: PursuitState) -> Self {
        Self {
            nodes: vec![Node::root(state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Get the root node.
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true, the root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Descend from the root while the current node is fully expanded,
    /// following the child with the highest UCT score.
    pub fn select(&self, c: f32) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.get(current);
            if node.children.is_empty() || !node.is_fully_expanded() {
                return current;
            }
            // INVARIANT: a fully expanded node has children
            current = self
                .best_child(current, c)
                .expect("BUG: fully expanded node has no children");
        }
    }

    /// Child of `id` maximizing UCT with exploration constant `c`.
    ///
    /// Ties go to the first child in insertion order.
    pub fn best_child(&self, id: NodeId, c: f32) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits = node.stats.visit_count;

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;
        for &child_id in &node.children {
            let score = self.get(child_id).stats.uct(parent_visits, c);
            if best.is_none() || score > best_score {
                best = Some(child_id);
                best_score = score;
            }
        }
        best
    }

    /// Add one child to `id` for its next untried action.
    ///
    /// `step` derives the child's state from the parent's state and the action.
    ///
    /// # Panics
    /// Panics if the node is already fully expanded. The search protocol
    /// never expands such a node, so reaching this is a bug.
    pub fn expand<F>(&mut self, id: NodeId, step: F) -> NodeId
    where
        F: FnOnce(PursuitState, Action) -> PursuitState,
    {
        let parent = self.get(id);
        let action = parent
            .next_untried_action()
            .expect("BUG: expand called on a fully expanded node");
        let state = step(parent.state, action);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(id), Some(action)));
        self.get_mut(id).children.push(child_id);
        child_id
    }

    /// Add `reward` and one visit to `id` and every ancestor up to the root.
    ///
    /// The same reward is added at every depth: values are from the planning
    /// agent's point of view throughout, with no sign alternation.
    pub fn backpropagate(&mut self, id: NodeId, reward: f32) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.stats.visit_count += 1;
            node.stats.value_sum += reward;
            current = node.parent;
        }
    }
}
