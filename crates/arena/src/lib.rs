//! Pursuit Arena - episodes of the three-agent pursuit game.
//!
//! This crate drives complete episodes around any set of [`Planner`]s:
//! loading grids, placing agents, stepping all three simultaneously from a
//! shared snapshot, detecting capture and collision, and recording the
//! trajectory.
//!
//! Agent `i` pursues agent `(i + 1) % 3` and flees agent `(i + 2) % 3`.
//!
//! [`Planner`]: pursuit_core::Planner

mod episode;
mod greedy;
mod grid_file;
mod render;
mod start;
mod trajectory;

pub use episode::{
    chain_roles, score_episode, Episode, EpisodeConfig, EpisodeOutcome, Positions, Termination, AGENTS,
};
pub use greedy::GreedyPlanner;
pub use grid_file::{load_grid, parse_grid, parse_npy};
pub use render::render_frame;
pub use start::sample_start_positions;
pub use trajectory::{write_trajectory, write_trajectory_csv, CSV_HEADER};
