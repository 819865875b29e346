//! One-step heuristic planner.

use pursuit_core::{is_valid, Action, Grid, Planner, Position, ACTIONS};

/// Picks the move that best trades closing on the target against opening
/// distance from the threat, looking one step ahead.
///
/// Only moves that stay in bounds and land on a free cell are considered.
/// Ties go to the earlier action; with no such move the agent stays.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    pub fn new() -> Self {
        Self
    }
}

impl Planner for GreedyPlanner {
    fn name(&self) -> &str {
        "greedy"
    }

    fn plan_action(&mut self, grid: &Grid, me: Position, target: Position, threat: Position) -> Action {
        let mut best = Action::STAY;
        let mut best_score = f32::NEG_INFINITY;

        for action in ACTIONS {
            if !is_valid(grid, me, action) {
                continue;
            }
            let next = action.apply(me);
            if !grid.is_walkable(next) {
                continue;
            }
            let score = -next.distance(target) + next.distance(threat);
            if score > best_score {
                best_score = score;
                best = action;
            }
        }

        best
    }
}
