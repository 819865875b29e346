//! Pursuit domain types with enforced invariants.
//!
//! - Position: integer grid coordinate, may lie outside the grid during simulation
//! - Reward: outcome estimate in range [-1, 1]

use crate::{PursuitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (row, col) coordinate on the grid.
///
/// Coordinates are signed so that simulated moves past the edge can be
/// represented and rejected by bounds checks instead of wrapping.
///
/// # Example
/// ```
/// use pursuit_core::Position;
///
/// let pos: Position = "3,4".parse().unwrap();
/// assert_eq!(pos, Position::new(3, 4));
/// assert_eq!(pos.manhattan(Position::new(0, 0)), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a new position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to another position.
    pub fn distance(self, other: Position) -> f32 {
        let dr = (self.row - other.row) as f32;
        let dc = (self.col - other.col) as f32;
        (dr * dr + dc * dc).sqrt()
    }

    /// Manhattan (L1) distance to another position.
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = PursuitError;

    /// Parse `"row,col"`, tolerating surrounding whitespace and parentheses.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed.split(',');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PursuitError::InvalidPosition(format!(
                "expected \"row,col\", got {:?}",
                s
            )));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| PursuitError::InvalidPosition(format!("{:?}: {}", s, e)))
        };

        Ok(Self::new(parse(row)?, parse(col)?))
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// An outcome estimate for the planning agent.
///
/// Invariant: Value is in range [-1, 1] where:
/// - +1 means the target was captured
/// - -1 means the agent was caught, crashed or left the grid
/// - 0 means no decisive outcome within the horizon
///
/// # Example
/// ```
/// use pursuit_core::Reward;
///
/// let reward = Reward::clamped(0.8);
/// assert!(reward.get() >= -1.0 && reward.get() <= 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Reward(f32);

impl Reward {
    /// Reward for capturing the pursued target.
    pub const CAPTURE: Self = Self(1.0);

    /// Reward for being caught, hitting an obstacle or leaving the grid.
    pub const LOSS: Self = Self(-1.0);

    /// Reward when nothing decisive happens.
    pub const NEUTRAL: Self = Self(0.0);

    /// Create a reward by clamping to [-1, 1].
    pub fn clamped(value: f32) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    /// Get the underlying value.
    pub fn get(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Reward> for f32 {
    fn from(r: Reward) -> f32 {
        r.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_position_manhattan() {
        assert_eq!(Position::new(1, 1).manhattan(Position::new(4, -2)), 6);
        assert_eq!(Position::new(2, 2).manhattan(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("3,4".parse::<Position>().unwrap(), Position::new(3, 4));
        assert_eq!(" 10 , 0 ".parse::<Position>().unwrap(), Position::new(10, 0));
        assert_eq!("(1,2)".parse::<Position>().unwrap(), Position::new(1, 2));
        assert_eq!("-1,2".parse::<Position>().unwrap(), Position::new(-1, 2));
    }

    #[test]
    fn test_position_parse_invalid() {
        assert!("".parse::<Position>().is_err());
        assert!("3".parse::<Position>().is_err());
        assert!("1,2,3".parse::<Position>().is_err());
        assert!("a,b".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(2, 7)), "(2, 7)");
    }

    #[test]
    fn test_reward_clamped() {
        assert_eq!(Reward::clamped(1.5).get(), 1.0);
        assert_eq!(Reward::clamped(-3.0).get(), -1.0);
        assert_eq!(Reward::clamped(0.8).get(), 0.8);
    }

    #[test]
    fn test_reward_constants() {
        assert_eq!(Reward::CAPTURE.get(), 1.0);
        assert_eq!(Reward::LOSS.get(), -1.0);
        assert_eq!(Reward::NEUTRAL.get(), 0.0);
    }
}
