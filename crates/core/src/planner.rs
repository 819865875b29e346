use crate::{Action, Grid, Position};

/// A decision procedure for one agent in the pursuit chain.
///
/// Every agent, whether it searches or follows a heuristic, is driven through
/// this interface by the episode controller. Implementations receive a
/// snapshot of the positions taken before any agent moved this turn.
pub trait Planner: Send {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    /// Choose the next move for the agent at `me`, which pursues `target`
    /// and flees `threat`.
    fn plan_action(&mut self, grid: &Grid, me: Position, target: Position, threat: Position) -> Action;
}

impl<P: Planner + ?Sized> Planner for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn plan_action(&mut self, grid: &Grid, me: Position, target: Position, threat: Position) -> Action {
        (**self).plan_action(grid, me, target, threat)
    }
}
