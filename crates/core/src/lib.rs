//! Pursuit Core - grid model, move rules and shared types
//!
//! This crate provides the static world that every planner in the
//! three-agent pursuit game reasons about: an immutable obstacle grid,
//! the closed set of nine relative moves, and the value types that flow
//! between planners and the episode controller.
//!
//! # Types
//!
//! - [`Grid`] - Read-only walkability mask with bounds queries
//! - [`Position`] - Integer (row, col) grid coordinate
//! - [`Action`] - One of the nine relative moves (including staying put)
//! - [`PursuitState`] - Mover, pursued target and pursuing threat positions
//! - [`Reward`] - Scalar outcome estimate in [-1, 1]
//! - [`Planner`] - Trait implemented by every agent's decision procedure

mod error;
mod grid;
mod moves;
mod planner;
mod state;
mod types;

pub use error::{PursuitError, Result};
pub use grid::{Grid, FREE, OBSTACLE};
pub use moves::{is_valid, legal_actions, Action, ACTIONS};
pub use planner::Planner;
pub use state::PursuitState;
pub use types::{Position, Reward};
