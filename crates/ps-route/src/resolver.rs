//! Destination resolver: one goal point per tick.

use ps_core::Vec2;

use crate::destination::Destination;
use crate::error::RouteResult;
use crate::event::RouteEvent;
use crate::path::PathFollower;
use crate::sequence::{Behaviour, BehaviourSequencer};

// ── Resolution ────────────────────────────────────────────────────────────────

/// Which targeting source supplied this tick's goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalSource {
    Path,
    Behaviour,
    Destination,
    /// The last explicitly set goal.
    LastGoal,
    /// The final waypoint of the attached behaviour sequence.
    ScriptEnd,
    /// Nothing to steer toward; the goal is the agent's own position.
    Hold,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub goal:   Vec2,
    pub source: GoalSource,
}

impl Resolution {
    #[inline]
    pub fn has_target(&self) -> bool {
        self.source != GoalSource::Hold
    }

    /// `true` for pass-through waypoints the agent should not stop at.
    #[inline]
    pub fn is_waypoint(&self) -> bool {
        matches!(self.source, GoalSource::Path | GoalSource::Behaviour)
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

/// Everything that decides where an agent steers: destination, optional path,
/// optional behaviour sequence, and the fallback goals.
///
/// Only [`resolve`](Self::resolve) moves cursors.  The mutators replace whole
/// sources; none of them rewinds a cursor in place.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Targeting {
    destination: Destination,
    path:        Option<PathFollower>,
    sequence:    Option<BehaviourSequencer>,
    last_goal:   Option<Vec2>,
    /// End of the attached behaviour sequence; tried after `last_goal`.
    script_goal: Option<Vec2>,
    /// Set once the current crossing/zone has been reported as reached.
    reached:     bool,
}

impl Targeting {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn path(&self) -> Option<&PathFollower> {
        self.path.as_ref()
    }

    pub fn sequence(&self) -> Option<&BehaviourSequencer> {
        self.sequence.as_ref()
    }

    pub fn last_goal(&self) -> Option<Vec2> {
        self.last_goal
    }

    pub fn script_goal(&self) -> Option<Vec2> {
        self.script_goal
    }

    /// `true` once the assigned crossing or zone has been reached.
    pub fn destination_reached(&self) -> bool {
        self.reached
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Replace the destination.
    ///
    /// On error the previous destination is left untouched.  An explicit goal
    /// also becomes the fallback goal.
    pub fn assign_destination(&mut self, destination: Destination) -> RouteResult<()> {
        destination.validate()?;
        if let Destination::ExplicitGoal(g) = destination {
            self.last_goal = Some(g);
        }
        self.destination = destination;
        self.reached = false;
        Ok(())
    }

    /// Replace the path and restart its cursor at the first waypoint.
    pub fn attach_path(&mut self, waypoints: Vec<Vec2>) {
        self.path = Some(PathFollower::new(waypoints));
    }

    pub fn clear_path(&mut self) {
        self.path = None;
    }

    /// Replace the behaviour sequence and restart it at `NotStarted`.
    ///
    /// The final waypoint of the final behaviour becomes the script fallback,
    /// used once the sequence completes if no explicit goal was ever set.
    pub fn attach_behaviours(&mut self, behaviours: Vec<Behaviour>) {
        self.sequence = BehaviourSequencer::new(behaviours);
        self.script_goal = self.sequence.as_ref().and_then(BehaviourSequencer::final_waypoint);
    }

    /// Drop the behaviour sequence along with its script fallback.
    pub fn clear_behaviours(&mut self) {
        self.sequence = None;
        self.script_goal = None;
    }

    // ── Resolution ────────────────────────────────────────────────────────

    /// Pick this tick's goal for an agent at `position`.
    ///
    /// A path or behaviour waypoint closer than `arrival_radius` is consumed
    /// (at most one per source per call); the source that finishes this way
    /// yields to the next one in the same call.  Progress is appended to
    /// `events`.
    pub fn resolve(
        &mut self,
        position: Vec2,
        arrival_radius: f32,
        events: &mut Vec<RouteEvent>,
    ) -> Resolution {
        if let Some(path) = self.path.as_mut() {
            if let Some(wp) = path.current() {
                if position.distance(wp) >= arrival_radius {
                    return Resolution { goal: wp, source: GoalSource::Path };
                }
                path.advance(events);
                if let Some(next) = path.current() {
                    return Resolution { goal: next, source: GoalSource::Path };
                }
            }
        }

        if let Some(seq) = self.sequence.as_mut() {
            if let Some(wp) = seq.target() {
                if position.distance(wp) >= arrival_radius {
                    return Resolution { goal: wp, source: GoalSource::Behaviour };
                }
                seq.advance(events);
                if let Some(next) = seq.target() {
                    return Resolution { goal: next, source: GoalSource::Behaviour };
                }
            }
        }

        if let Some(goal) = self.destination.reference_point() {
            if !self.reached && position.distance(goal) <= arrival_radius {
                match &self.destination {
                    Destination::Crossing(c) => {
                        events.push(RouteEvent::CrossingReached(c.id()));
                        self.reached = true;
                    }
                    Destination::TransitionZone(z) => {
                        events.push(RouteEvent::ZoneReached(z.id()));
                        self.reached = true;
                    }
                    Destination::ExplicitGoal(_) | Destination::None => {}
                }
            }
            return Resolution { goal, source: GoalSource::Destination };
        }

        match (self.last_goal, self.script_goal) {
            (Some(goal), _)    => Resolution { goal, source: GoalSource::LastGoal },
            (None, Some(goal)) => Resolution { goal, source: GoalSource::ScriptEnd },
            (None, None)       => Resolution { goal: position, source: GoalSource::Hold },
        }
    }
}
