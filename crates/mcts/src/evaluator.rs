//! Leaf evaluation for MCTS.
//!
//! The `Evaluator` trait lets the search swap its value estimate. The
//! provided `RolloutEvaluator` plays a short stochastic future with a
//! softmax-weighted chase/flee policy and shapes the outcome into a reward.

use crate::{config::MctsConfig, response::ResponseModel};
use pursuit_core::{Action, Grid, PursuitState, Reward, ACTIONS};
use rand::Rng;
use std::cell::RefCell;

/// Trait for estimating the value of a simulated state.
pub trait Evaluator {
    /// Estimate the planning agent's outcome from `state`, in [-1, 1].
    ///
    /// `model` moves the two opponents for any simulated steps.
    fn evaluate<M: ResponseModel + ?Sized>(&self, grid: &Grid, state: &PursuitState, model: &M) -> Reward;
}

/// Evaluator using depth-limited stochastic playouts.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Maximum number of joint steps in a playout.
    max_depth: usize,

    /// Distance below which proximity shaping triggers.
    proximity_radius: f32,

    /// Shaped reward magnitude on proximity.
    proximity_reward: Reward,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a rollout evaluator with default shaping.
    ///
    /// # Arguments
    /// * `rng` - Random number generator for action sampling
    /// * `max_depth` - Maximum joint steps in a playout
    pub fn new(rng: R, max_depth: usize) -> Self {
        Self::from_config(rng, &MctsConfig::default().rollout_depth(max_depth))
    }

    /// Create a rollout evaluator from the rollout fields of `config`.
    pub fn from_config(rng: R, config: &MctsConfig) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_depth: config.rollout_depth,
            proximity_radius: config.proximity_radius,
            proximity_reward: Reward::clamped(config.proximity_reward),
        }
    }

    /// Reward if `state` ends the playout, checked in priority order.
    ///
    /// The bounds check comes first so that no grid lookup ever happens
    /// at an out-of-range position.
    pub fn terminal_reward(&self, grid: &Grid, state: &PursuitState) -> Option<Reward> {
        if !grid.in_bounds(state.mover) {
            return Some(Reward::LOSS);
        }
        if state.mover == state.target && grid.is_walkable(state.mover) {
            return Some(Reward::CAPTURE);
        }
        if state.mover == state.threat || grid.is_obstacle(state.mover) {
            return Some(Reward::LOSS);
        }

        if state.target_distance() < self.proximity_radius {
            return Some(self.proximity_reward);
        }
        if state.threat_distance() < self.proximity_radius {
            return Some(Reward::clamped(-self.proximity_reward.get()));
        }
        None
    }

    /// Play out from `initial_state` for at most `max_depth` steps.
    pub fn rollout<M: ResponseModel + ?Sized>(&self, grid: &Grid, initial_state: &PursuitState, model: &M) -> Reward {
        let mut state = *initial_state;

        for _ in 0..self.max_depth {
            if let Some(reward) = self.terminal_reward(grid, &state) {
                return reward;
            }
            let action = self.sample_action(&state);
            state = model.step(grid, state, action);
        }

        // No decisive outcome within the horizon
        Reward::NEUTRAL
    }

    /// Sample the mover's next action from the softmax rollout policy.
    fn sample_action(&self, state: &PursuitState) -> Action {
        let probs = softmax(&action_scores(state));
        let threshold: f64 = self.rng.borrow_mut().gen::<f64>();

        let mut cumulative = 0.0;
        for (action, p) in ACTIONS.iter().zip(probs.iter()) {
            cumulative += p;
            if cumulative >= threshold {
                return *action;
            }
        }

        // Rounding left the cumulative sum just below the threshold
        ACTIONS[ACTIONS.len() - 1]
    }
}

impl<R: Rng> Evaluator for RolloutEvaluator<R> {
    fn evaluate<M: ResponseModel + ?Sized>(&self, grid: &Grid, state: &PursuitState, model: &M) -> Reward {
        self.rollout(grid, state, model)
    }
}

/// Heuristic score of every action from `state`: closer to the target and
/// farther from the threat is better.
///
/// Scores ignore bounds and obstacles; the playout discovers those.
pub fn action_scores(state: &PursuitState) -> [f32; 9] {
    ACTIONS.map(|action| {
        let next = action.apply(state.mover);
        -next.distance(state.target) + next.distance(state.threat)
    })
}

/// Numerically stable softmax.
pub fn softmax(scores: &[f32; 9]) -> [f64; 9] {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps = scores.map(|s| (s as f64 - max).exp());
    let sum: f64 = exps.iter().sum();
    exps.map(|e| e / sum)
}
