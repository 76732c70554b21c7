//! Route events: progress signals emitted as a side effect of resolution.

use ps_core::{CrossingId, ZoneId};

/// Written in place of a detail the event does not carry.
pub const NO_DETAIL: u32 = u32::MAX;

/// Something the external driver may want to react to (retire the agent,
/// re-task it, log it).
///
/// Events are produced by [`Targeting::resolve`][crate::Targeting::resolve]
/// and returned to the caller; the route layer never acts on them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteEvent {
    /// Path waypoint `index` was reached and the cursor moved past it.
    PathWaypointReached { index: usize },

    /// The last path waypoint was reached; the path is now exhausted.
    PathExhausted,

    /// Waypoint `waypoint` of behaviour `behaviour` was reached.
    BehaviourWaypointReached { behaviour: usize, waypoint: usize },

    /// Every waypoint of behaviour `behaviour` has been reached.
    BehaviourFinished { behaviour: usize },

    /// The last behaviour finished; the sequencer is now `Completed`.
    SequenceCompleted,

    /// The agent came within arrival distance of its assigned crossing.
    CrossingReached(CrossingId),

    /// The agent came within arrival distance of its assigned zone.
    ZoneReached(ZoneId),
}

impl RouteEvent {
    /// Stable label, useful for CSV/Parquet column values.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteEvent::PathWaypointReached { .. }      => "path_waypoint",
            RouteEvent::PathExhausted                   => "path_exhausted",
            RouteEvent::BehaviourWaypointReached { .. } => "behaviour_waypoint",
            RouteEvent::BehaviourFinished { .. }        => "behaviour_finished",
            RouteEvent::SequenceCompleted               => "sequence_completed",
            RouteEvent::CrossingReached(_)              => "crossing_reached",
            RouteEvent::ZoneReached(_)                  => "zone_reached",
        }
    }

    /// The primary payload (path index, behaviour index or geometry id), or
    /// [`NO_DETAIL`].  Indices that do not fit a `u32` saturate.
    pub fn detail(self) -> u32 {
        match self {
            RouteEvent::PathWaypointReached { index }              => saturate(index),
            RouteEvent::BehaviourWaypointReached { behaviour, .. } => saturate(behaviour),
            RouteEvent::BehaviourFinished { behaviour }            => saturate(behaviour),
            RouteEvent::CrossingReached(id)                        => id.0,
            RouteEvent::ZoneReached(id)                            => id.0,
            RouteEvent::PathExhausted | RouteEvent::SequenceCompleted => NO_DETAIL,
        }
    }

    /// The waypoint index within its behaviour for
    /// `BehaviourWaypointReached`, [`NO_DETAIL`] for everything else.
    pub fn sub_detail(self) -> u32 {
        match self {
            RouteEvent::BehaviourWaypointReached { waypoint, .. } => saturate(waypoint),
            _ => NO_DETAIL,
        }
    }

    /// `true` for events that mean the agent has reached its final
    /// crossing or zone.
    #[inline]
    pub fn is_destination_reached(self) -> bool {
        matches!(self, RouteEvent::CrossingReached(_) | RouteEvent::ZoneReached(_))
    }
}

fn saturate(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

impl std::fmt::Display for RouteEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
