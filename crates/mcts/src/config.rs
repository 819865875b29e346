//! MCTS configuration parameters.
//!
//! These parameters control the search budget, the exploration tradeoff and
//! the shape of the rollout reward.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    /// This is the only throttle on search latency.
    pub iterations: usize,

    /// UCT exploration constant `c` used while descending the tree.
    /// Final action selection always uses 0.
    pub exploration: f32,

    /// Maximum number of joint steps in a rollout.
    pub rollout_depth: usize,

    /// Euclidean distance below which a rollout stops with a shaped reward.
    pub proximity_radius: f32,

    /// Magnitude of the shaped reward returned on proximity to the target
    /// (positive) or the threat (negative).
    pub proximity_reward: f32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            exploration: 1.4,
            rollout_depth: 20,
            proximity_radius: 2.0,
            proximity_reward: 0.8,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Set the rollout depth.
    pub fn rollout_depth(mut self, depth: usize) -> Self {
        self.rollout_depth = depth;
        self
    }

    /// Set the exploration constant.
    pub fn exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }
}
