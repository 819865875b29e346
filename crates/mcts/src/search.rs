//! Monte Carlo Tree Search implementation.
//!
//! Classic UCT: each iteration selects down fully expanded nodes, expands
//! one new child of a previously visited node, evaluates the reached node
//! with a rollout, and adds the reward to every node on the path.

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    response::ResponseModel,
    tree::Tree,
};
use pursuit_core::{Action, Grid, PursuitState};
use tracing::trace;

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats {
    /// Action leading to the child.
    pub action: Action,

    /// Number of visits.
    pub visits: u32,

    /// Mean reward over all visits.
    pub mean_value: f32,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Chosen action: highest mean reward among root children.
    pub best_action: Action,

    /// Root children in action order.
    pub children: Vec<ChildStats>,

    /// Visits recorded at the root (equals the iteration count).
    pub root_visits: u32,

    /// Mean reward at the root.
    pub root_value: f32,

    /// Total nodes allocated in the tree.
    pub tree_size: usize,
}

impl SearchResult {
    /// Root child with the most visits, first one on ties.
    ///
    /// Reported for comparison only; [`SearchResult::best_action`] is the
    /// highest-mean child.
    pub fn most_visited(&self) -> Option<Action> {
        let mut best: Option<&ChildStats> = None;
        for child in &self.children {
            if best.map_or(true, |b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.map(|c| c.action)
    }

    /// Statistics for the root child reached by `action`, if it was expanded.
    pub fn child(&self, action: Action) -> Option<&ChildStats> {
        self.children.iter().find(|c| c.action == action)
    }
}

/// Monte Carlo Tree Search with UCT selection.
///
/// Generic over:
/// - `E`: The leaf evaluation strategy
/// - `M`: How the two opponents move inside simulations
pub struct Mcts<E: Evaluator, M: ResponseModel> {
    config: MctsConfig,
    evaluator: E,
    model: M,
}

impl<E, M> Mcts<E, M>
where
    E: Evaluator,
    M: ResponseModel,
{
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, evaluator: E, model: M) -> Self {
        Self {
            config,
            evaluator,
            model,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run MCTS from `state`, returning search results.
    ///
    /// The tree lives only for the duration of this call.
    pub fn search(&mut self, grid: &Grid, state: &PursuitState) -> SearchResult {
        let tree = self.build_tree(grid, state);
        let result = self.extract_results(&tree);

        trace!(
            iterations = self.config.iterations,
            tree_size = result.tree_size,
            root_value = result.root_value,
            best_action = %result.best_action,
            "search complete"
        );

        result
    }

    /// Run all iterations and return the finished tree.
    pub fn build_tree(&mut self, grid: &Grid, state: &PursuitState) -> Tree {
        let mut tree = Tree::new(*state);
        for _ in 0..self.config.iterations {
            self.simulate(grid, &mut tree);
        }
        tree
    }

    /// Run a single iteration: select -> expand -> simulate -> backpropagate.
    fn simulate(&self, grid: &Grid, tree: &mut Tree) {
        // SELECT: descend while fully expanded
        let mut node_id = tree.select(self.config.exploration);

        // EXPAND: only nodes that were already sampled once grow a child
        let node = tree.get(node_id);
        if node.stats.visit_count > 0 && !node.is_fully_expanded() {
            let model = &self.model;
            node_id = tree.expand(node_id, |state, action| model.step(grid, state, action));
        }

        // SIMULATE
        let state = tree.get(node_id).state;
        let reward = self.evaluator.evaluate(grid, &state, &self.model);

        // BACKPROPAGATE
        tree.backpropagate(node_id, reward.get());
    }

    /// Extract search results from the root node.
    fn extract_results(&self, tree: &Tree) -> SearchResult {
        let root = tree.root();

        let children: Vec<ChildStats> = root
            .children
            .iter()
            .map(|&id| {
                let child = tree.get(id);
                ChildStats {
                    // INVARIANT: every non-root node records its action
                    action: child.action.expect("BUG: child node without action"),
                    visits: child.stats.visit_count,
                    mean_value: child.stats.mean_value(),
                }
            })
            .collect();

        // Exploration disabled: pick the best mean. With fewer than two
        // iterations the root was never expanded, so stay put.
        let best_action = tree
            .best_child(NodeId::ROOT, 0.0)
            .and_then(|id| tree.get(id).action)
            .unwrap_or(Action::STAY);

        SearchResult {
            best_action,
            children,
            root_visits: root.stats.visit_count,
            root_value: root.stats.mean_value(),
            tree_size: tree.len(),
        }
    }
}
