//! Monte Carlo Tree Search planner for three-agent grid pursuit.
//!
//! One agent chooses each move by growing a fresh search tree over
//! hypothetical futures in which it moves freely and the other two agents
//! follow a [`ResponseModel`].
//!
//! # Features
//!
//! - **UCT Selection**: Upper-confidence descent with a configurable constant
//! - **Incremental Expansion**: One child per visit, in fixed action order
//! - **Shaped Rollouts**: Softmax chase/flee playouts with proximity rewards
//! - **Pluggable Opponents**: Swap the response model used in simulation
//! - **Arena Tree**: Index-linked nodes, freed in one go after each search
//!
//! # Example
//!
//! ```
//! use pursuit_core::{Grid, Planner, Position};
//! use pursuit_mcts::{MctsConfig, MctsPlanner};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let grid = Grid::open(10, 10);
//! let mut planner = MctsPlanner::new(MctsConfig::with_iterations(100), ChaCha8Rng::seed_from_u64(42));
//!
//! let action = planner.plan_action(&grid, Position::new(5, 5), Position::new(2, 2), Position::new(9, 9));
//! println!("Best action: {}", action);
//! ```

pub mod config;
pub mod evaluator;
mod node;
pub mod planner;
pub mod response;
pub mod search;
mod tree;

pub use config::MctsConfig;
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use node::{Node, NodeId, NodeStats};
pub use planner::{plan_action, MctsPlanner};
pub use response::{greedy_step, GreedyResponse, HoldPosition, ResponseModel};
pub use search::{ChildStats, Mcts, SearchResult};
pub use tree::Tree;
