//! Models of how the two non-planning agents react inside simulations.
//!
//! The planner never sees the real opponents' logic. Instead every simulated
//! step asks a [`ResponseModel`] where the target and the threat go next, so
//! simulation fidelity can be tuned independently of the actual opponents.

use pursuit_core::{Action, Grid, Position, PursuitState, ACTIONS};

/// Predicts the opponents' next positions for one simulated step.
pub trait ResponseModel {
    /// Return `(next_target, next_threat)` given the state before anyone moved.
    fn respond(&self, grid: &Grid, state: &PursuitState) -> (Position, Position);

    /// Apply the mover's `action` and the opponents' response as one joint step.
    ///
    /// All three agents move simultaneously from `state`.
    fn step(&self, grid: &Grid, state: PursuitState, action: Action) -> PursuitState {
        let (target, threat) = self.respond(grid, &state);
        state.advance(action, target, threat)
    }
}

impl<M: ResponseModel + ?Sized> ResponseModel for &M {
    fn respond(&self, grid: &Grid, state: &PursuitState) -> (Position, Position) {
        (**self).respond(grid, state)
    }
}

/// Single greedy step from `mover` toward `target`.
///
/// Among the nine candidate cells that are in bounds and walkable, returns
/// the one closest to `target` in Euclidean distance, preferring the earlier
/// action on ties. Returns `mover` unchanged if no candidate is walkable.
pub fn greedy_step(grid: &Grid, mover: Position, target: Position) -> Position {
    let mut best = None;
    let mut best_dist = f32::INFINITY;

    for action in ACTIONS {
        let next = action.apply(mover);
        if !grid.is_walkable(next) {
            continue;
        }
        let dist = next.distance(target);
        if dist < best_dist {
            best_dist = dist;
            best = Some(next);
        }
    }

    best.unwrap_or(mover)
}

/// Greedy chase following the predator chain.
///
/// The target heads for the threat (its own prey in the chain) and the
/// threat heads for the mover.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyResponse;

impl ResponseModel for GreedyResponse {
    fn respond(&self, grid: &Grid, state: &PursuitState) -> (Position, Position) {
        (
            greedy_step(grid, state.target, state.threat),
            greedy_step(grid, state.threat, state.mover),
        )
    }
}

/// Both opponents stay where they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldPosition;

impl ResponseModel for HoldPosition {
    fn respond(&self, _grid: &Grid, state: &PursuitState) -> (Position, Position) {
        (state.target, state.threat)
    }
}
