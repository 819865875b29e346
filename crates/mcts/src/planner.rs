//! Search-backed implementation of the [`Planner`] interface.

use crate::{
    config::MctsConfig,
    evaluator::RolloutEvaluator,
    response::{GreedyResponse, ResponseModel},
    search::{Mcts, SearchResult},
};
use pursuit_core::{Action, Grid, Planner, Position, PursuitState};
use rand::Rng;
use tracing::debug;

/// Planner that runs a fresh MCTS for every decision.
///
/// No tree survives between calls; only the random source advances.
pub struct MctsPlanner<R: Rng, M: ResponseModel = GreedyResponse> {
    mcts: Mcts<RolloutEvaluator<R>, M>,
}

impl<R: Rng> MctsPlanner<R, GreedyResponse> {
    /// Planner with the greedy chain response model.
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self::with_model(config, rng, GreedyResponse)
    }
}

impl<R: Rng, M: ResponseModel> MctsPlanner<R, M> {
    /// Planner with a custom model of the opponents.
    pub fn with_model(config: MctsConfig, rng: R, model: M) -> Self {
        let evaluator = RolloutEvaluator::from_config(rng, &config);
        Self {
            mcts: Mcts::new(config, evaluator, model),
        }
    }

    /// Run a search and return the full result rather than just the action.
    pub fn search(&mut self, grid: &Grid, me: Position, target: Position, threat: Position) -> SearchResult {
        let root = PursuitState::new(me, target, threat);
        self.mcts.search(grid, &root)
    }

    /// The active configuration.
    pub fn config(&self) -> &MctsConfig {
        self.mcts.config()
    }
}

impl<R, M> Planner for MctsPlanner<R, M>
where
    R: Rng + Send,
    M: ResponseModel + Send,
{
    fn name(&self) -> &str {
        "mcts"
    }

    fn plan_action(&mut self, grid: &Grid, me: Position, target: Position, threat: Position) -> Action {
        let result = self.search(grid, me, target, threat);
        debug!(
            me = %me,
            target = %target,
            threat = %threat,
            action = %result.best_action,
            root_value = result.root_value,
            "mcts decision"
        );
        result.best_action
    }
}

/// Choose one action for the agent at `me` with the default configuration.
///
/// Deterministic for a given `rng` state.
pub fn plan_action<R: Rng>(grid: &Grid, me: Position, target: Position, threat: Position, rng: R) -> Action {
    MctsPlanner::new(MctsConfig::default(), rng)
        .search(grid, me, target, threat)
        .best_action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::HoldPosition;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_planner_name() {
        let planner = MctsPlanner::new(MctsConfig::with_iterations(5), ChaCha8Rng::seed_from_u64(0));
        assert_eq!(planner.name(), "mcts");
        assert_eq!(planner.config().iterations, 5);
    }

    #[test]
    fn test_plan_action_deterministic() {
        let grid = Grid::open(10, 10);
        let me = Position::new(4, 4);
        let target = Position::new(1, 8);
        let threat = Position::new(9, 0);
        let a = plan_action(&grid, me, target, threat, ChaCha8Rng::seed_from_u64(9));
        let b = plan_action(&grid, me, target, threat, ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_planner_trait_object() {
        let grid = Grid::open(6, 6);
        let mut planner: Box<dyn Planner> = Box::new(MctsPlanner::with_model(
            MctsConfig::with_iterations(10),
            ChaCha8Rng::seed_from_u64(1),
            HoldPosition,
        ));
        // Target one step to the right: the capture child wins
        let action = planner.plan_action(&grid, Position::new(2, 2), Position::new(2, 3), Position::new(5, 5));
        assert_eq!(action, Action::RIGHT);
    }
}
