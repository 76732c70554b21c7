//! Flat precomputed path, consumed one waypoint at a time.

use ps_core::Vec2;

use crate::event::RouteEvent;

/// Cursor state of a [`PathFollower`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathState {
    /// Steering toward waypoint `index`.
    Pending(usize),
    /// Every waypoint has been reached.  Terminal.
    Exhausted,
}

/// An ordered waypoint list produced by an external path search.
///
/// The cursor only moves forward; a new path must be attached to restart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathFollower {
    waypoints: Vec<Vec2>,
    state:     PathState,
}

impl PathFollower {
    /// Start at the first waypoint.  An empty path is born `Exhausted`.
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        let state = if waypoints.is_empty() { PathState::Exhausted } else { PathState::Pending(0) };
        Self { waypoints, state }
    }

    #[inline]
    pub fn state(&self) -> PathState {
        self.state
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.state == PathState::Exhausted
    }

    /// Monotone progress counter: the pending index, or `len()` once
    /// exhausted.
    pub fn cursor(&self) -> usize {
        match self.state {
            PathState::Pending(i) => i,
            PathState::Exhausted  => self.waypoints.len(),
        }
    }

    /// The waypoint currently being steered toward.
    pub fn current(&self) -> Option<Vec2> {
        match self.state {
            PathState::Pending(i) => self.waypoints.get(i).copied(),
            PathState::Exhausted  => None,
        }
    }

    /// Mark the current waypoint reached and move to the next one.
    ///
    /// No-op once exhausted.
    pub fn advance(&mut self, events: &mut Vec<RouteEvent>) {
        let PathState::Pending(i) = self.state else {
            return;
        };
        events.push(RouteEvent::PathWaypointReached { index: i });
        if i + 1 < self.waypoints.len() {
            self.state = PathState::Pending(i + 1);
        } else {
            self.state = PathState::Exhausted;
            events.push(RouteEvent::PathExhausted);
        }
    }
}
