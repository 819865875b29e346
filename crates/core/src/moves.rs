//! The nine relative moves and the rule that decides whether one may be applied.
//!
//! The order of [`ACTIONS`] is significant: search trees expand children in
//! this order and every tie-break falls back to it.

use crate::{Grid, Position, PursuitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Allowed range of each action component.
const UNIT: RangeInclusive<i32> = -1..=1;

/// A relative move of at most one cell along each axis.
///
/// The set is closed: values can only be obtained from the associated
/// constants, [`ACTIONS`], or the validating [`Action::try_new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    dr: i8,
    dc: i8,
}

impl Action {
    pub const STAY: Action = Action { dr: 0, dc: 0 };
    pub const UP: Action = Action { dr: -1, dc: 0 };
    pub const DOWN: Action = Action { dr: 1, dc: 0 };
    pub const LEFT: Action = Action { dr: 0, dc: -1 };
    pub const RIGHT: Action = Action { dr: 0, dc: 1 };
    pub const UP_LEFT: Action = Action { dr: -1, dc: -1 };
    pub const UP_RIGHT: Action = Action { dr: -1, dc: 1 };
    pub const DOWN_LEFT: Action = Action { dr: 1, dc: -1 };
    pub const DOWN_RIGHT: Action = Action { dr: 1, dc: 1 };

    /// Build an action from raw deltas.
    ///
    /// # Errors
    /// Returns `PursuitError::InvalidAction` if either component has magnitude > 1.
    pub fn try_new(dr: i32, dc: i32) -> Result<Self> {
        if !UNIT.contains(&dr) || !UNIT.contains(&dc) {
            return Err(PursuitError::InvalidAction { dr, dc });
        }
        Ok(Self {
            dr: dr as i8,
            dc: dc as i8,
        })
    }

    /// Row delta.
    #[inline]
    pub const fn dr(self) -> i32 {
        self.dr as i32
    }

    /// Column delta.
    #[inline]
    pub const fn dc(self) -> i32 {
        self.dc as i32
    }

    /// Position reached by applying this action. Not bounds checked.
    #[inline]
    pub const fn apply(self, pos: Position) -> Position {
        Position::new(pos.row + self.dr as i32, pos.col + self.dc as i32)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dr, self.dc)
    }
}

/// All nine moves in expansion order.
pub const ACTIONS: [Action; 9] = [
    Action::STAY,
    Action::UP,
    Action::DOWN,
    Action::LEFT,
    Action::RIGHT,
    Action::UP_LEFT,
    Action::UP_RIGHT,
    Action::DOWN_LEFT,
    Action::DOWN_RIGHT,
];

/// The fixed ordered sequence of legal relative moves.
#[inline]
pub fn legal_actions() -> &'static [Action; 9] {
    &ACTIONS
}

/// Whether `action` may be applied at `position`.
///
/// Obstacles are not checked: stepping onto one is legal and is caught by
/// collision detection afterwards.
#[inline]
pub fn is_valid(grid: &Grid, position: Position, action: Action) -> bool {
    let (dr, dc) = (action.dr(), action.dc());
    UNIT.contains(&dr) && UNIT.contains(&dc) && grid.in_bounds(action.apply(position))
}
