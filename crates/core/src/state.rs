use crate::{Action, Position};

/// Snapshot of the three positions the planning agent reasons about.
///
/// The grid is not part of the snapshot: it is immutable and shared by
/// reference, so only the positions are copied into every simulated branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PursuitState {
    /// The planning agent.
    pub mover: Position,
    /// The peer the mover pursues.
    pub target: Position,
    /// The peer pursuing the mover.
    pub threat: Position,
}

impl PursuitState {
    pub const fn new(mover: Position, target: Position, threat: Position) -> Self {
        Self {
            mover,
            target,
            threat,
        }
    }

    /// Successor state after the mover takes `action` and the opponents
    /// move to the given positions.
    pub fn advance(self, action: Action, target: Position, threat: Position) -> Self {
        Self {
            mover: action.apply(self.mover),
            target,
            threat,
        }
    }

    /// Euclidean distance from the mover to its target.
    pub fn target_distance(&self) -> f32 {
        self.mover.distance(self.target)
    }

    /// Euclidean distance from the mover to its threat.
    pub fn threat_distance(&self) -> f32 {
        self.mover.distance(self.threat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_copies() {
        let state = PursuitState::new(Position::new(1, 1), Position::new(3, 3), Position::new(0, 5));
        let next = state.advance(Action::DOWN_RIGHT, Position::new(3, 4), Position::new(1, 4));

        assert_eq!(next.mover, Position::new(2, 2));
        assert_eq!(next.target, Position::new(3, 4));
        assert_eq!(next.threat, Position::new(1, 4));
        // The original snapshot is untouched
        assert_eq!(state.mover, Position::new(1, 1));
    }

    #[test]
    fn test_distances() {
        let state = PursuitState::new(Position::new(0, 0), Position::new(3, 4), Position::new(0, 1));
        assert!((state.target_distance() - 5.0).abs() < 1e-6);
        assert!((state.threat_distance() - 1.0).abs() < 1e-6);
    }
}
