//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices: a child stores its parent's index
//! instead of a back-pointer, so the tree has no ownership cycles.

use pursuit_core::{Action, PursuitState, ACTIONS};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Visit statistics for a single node.
#[derive(Clone, Debug, Default)]
pub struct NodeStats {
    /// Number of backpropagations that passed through this node.
    pub visit_count: u32,

    /// Sum of rewards from all visits.
    pub value_sum: f32,
}

impl NodeStats {
    /// Mean reward for this node.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// Upper-confidence score as seen from a parent with `parent_visits`.
    ///
    /// Unvisited nodes score +inf so they are always tried first.
    pub fn uct(&self, parent_visits: u32, c: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let n = self.visit_count as f32;
        let exploration = if c == 0.0 {
            0.0
        } else {
            c * (2.0 * (parent_visits as f32).ln() / n).sqrt()
        };
        self.value_sum / n + exploration
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// Simulated state at this node (independent copy).
    pub state: PursuitState,

    /// Parent index (None for root).
    pub parent: Option<NodeId>,

    /// Action that led here from the parent (None for root).
    pub action: Option<Action>,

    /// Children in insertion (= action) order.
    pub children: Vec<NodeId>,

    /// Visit statistics.
    pub stats: NodeStats,
}

impl Node {
    /// Create an unvisited node.
    pub fn new(state: PursuitState, parent: Option<NodeId>, action: Option<Action>) -> Self {
        Self {
            state,
            parent,
            action,
            children: Vec::with_capacity(ACTIONS.len()),
            stats: NodeStats::default(),
        }
    }

    /// Create the root node.
    pub fn root(state: PursuitState) -> Self {
        Self::new(state, None, None)
    }

    /// True once a child exists for every action.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == ACTIONS.len()
    }

    /// The next action to expand, in fixed order.
    ///
    /// Children are always added in [`ACTIONS`] order, so the first
    /// untried action is the one at index `children.len()`.
    #[inline]
    pub fn next_untried_action(&self) -> Option<Action> {
        ACTIONS.get(self.children.len()).copied()
    }
}
