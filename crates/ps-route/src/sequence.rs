//! Behaviour sequencer: a two-level cursor over scripted waypoint legs.
//!
//! # State machine
//!
//! ```text
//! NotStarted ──first query──▶ InProgress(0, 0)
//! InProgress(b, w)      ──reached──▶ InProgress(b, w + 1)   more waypoints in b
//! InProgress(b, w_last) ──reached──▶ InProgress(b + 1, 0)   more behaviours
//! InProgress(last, w_last) ──reached──▶ Completed            (absorbing)
//! ```

use ps_core::Vec2;

use crate::event::RouteEvent;

// ── Behaviour ─────────────────────────────────────────────────────────────────

/// One scripted leg: an ordered list of waypoints.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Behaviour {
    pub waypoints: Vec<Vec2>,
}

impl Behaviour {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl From<Vec<Vec2>> for Behaviour {
    fn from(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }
}

// ── SequenceState ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceState {
    NotStarted,
    InProgress { behaviour: usize, waypoint: usize },
    Completed,
}

// ── BehaviourSequencer ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviourSequencer {
    behaviours: Vec<Behaviour>,
    state:      SequenceState,
}

impl BehaviourSequencer {
    /// Build a sequencer from a behaviour list.
    ///
    /// Behaviours without waypoints are dropped.  Returns `None` when nothing
    /// is left, in which case the agent has no sequencer at all.
    pub fn new(behaviours: Vec<Behaviour>) -> Option<Self> {
        let total = behaviours.len();
        let behaviours: Vec<Behaviour> = behaviours.into_iter().filter(|b| !b.is_empty()).collect();
        if behaviours.len() < total {
            log::warn!(
                "dropped {} empty behaviour(s) out of {total}",
                total - behaviours.len()
            );
        }
        if behaviours.is_empty() {
            return None;
        }
        Some(Self { behaviours, state: SequenceState::NotStarted })
    }

    #[inline]
    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn behaviours(&self) -> &[Behaviour] {
        &self.behaviours
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == SequenceState::Completed
    }

    /// Lexicographic progress key `(behaviour, waypoint)`.  `Completed`
    /// maps past every valid position.
    pub fn cursor(&self) -> (usize, usize) {
        match self.state {
            SequenceState::NotStarted => (0, 0),
            SequenceState::InProgress { behaviour, waypoint } => (behaviour, waypoint),
            SequenceState::Completed => (self.behaviours.len(), 0),
        }
    }

    /// Final waypoint of the final behaviour.
    pub fn final_waypoint(&self) -> Option<Vec2> {
        self.behaviours.last().and_then(|b| b.waypoints.last()).copied()
    }

    /// The waypoint currently being steered toward.  The first query moves
    /// `NotStarted` to `InProgress(0, 0)`.
    pub fn target(&mut self) -> Option<Vec2> {
        if self.state == SequenceState::NotStarted {
            self.state = SequenceState::InProgress { behaviour: 0, waypoint: 0 };
        }
        match self.state {
            SequenceState::InProgress { behaviour, waypoint } => self
                .behaviours
                .get(behaviour)
                .and_then(|b| b.waypoints.get(waypoint))
                .copied(),
            _ => None,
        }
    }

    /// Mark the current waypoint reached and move the cursor one position.
    ///
    /// No-op in `NotStarted` and `Completed`.
    pub fn advance(&mut self, events: &mut Vec<RouteEvent>) {
        let SequenceState::InProgress { behaviour: b, waypoint: w } = self.state else {
            return;
        };
        events.push(RouteEvent::BehaviourWaypointReached { behaviour: b, waypoint: w });

        let leg_len = self.behaviours.get(b).map_or(0, |leg| leg.waypoints.len());
        if w + 1 < leg_len {
            self.state = SequenceState::InProgress { behaviour: b, waypoint: w + 1 };
            return;
        }

        events.push(RouteEvent::BehaviourFinished { behaviour: b });
        if b + 1 < self.behaviours.len() {
            self.state = SequenceState::InProgress { behaviour: b + 1, waypoint: 0 };
        } else {
            self.state = SequenceState::Completed;
            events.push(RouteEvent::SequenceCompleted);
        }
    }
}
