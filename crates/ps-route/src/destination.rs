//! The tagged destination an agent is heading for.

use std::sync::Arc;

use ps_core::{Crossing, TransitionZone, Vec2};

use crate::error::{RouteError, RouteResult};

/// Where an agent is ultimately going.
///
/// Exactly one variant is active at a time, so a raw goal vector and an exit
/// crossing can never both be set with unclear precedence.  Geometry is
/// shared read-only across every agent that targets it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// No destination; the agent falls back to its last goal, or holds.
    #[default]
    None,

    /// A bare coordinate.
    ExplicitGoal(Vec2),

    /// An exit or entrance line.
    Crossing(Arc<Crossing>),

    /// A non-exit region.
    TransitionZone(Arc<TransitionZone>),
}

impl Destination {
    /// Check the assignment preconditions: geometry must have at least one
    /// vertex and an explicit goal must be finite.
    pub fn validate(&self) -> RouteResult<()> {
        match self {
            Destination::None => Ok(()),
            Destination::ExplicitGoal(g) => {
                if g.is_finite() { Ok(()) } else { Err(RouteError::NonFiniteGoal) }
            }
            Destination::Crossing(c) if c.is_empty() => Err(RouteError::EmptyGeometry {
                kind: "crossing",
                id:   c.id().0,
            }),
            Destination::TransitionZone(z) if z.is_empty() => Err(RouteError::EmptyGeometry {
                kind: "transition zone",
                id:   z.id().0,
            }),
            Destination::Crossing(_) | Destination::TransitionZone(_) => Ok(()),
        }
    }

    /// The point an agent steers toward for this destination.
    ///
    /// Geometry resolves to its vertex centroid.  `None` for
    /// `Destination::None` (and for empty geometry, which validation rejects).
    pub fn reference_point(&self) -> Option<Vec2> {
        match self {
            Destination::None               => None,
            Destination::ExplicitGoal(g)    => Some(*g),
            Destination::Crossing(c)        => c.reference_point(),
            Destination::TransitionZone(z)  => z.reference_point(),
        }
    }

    /// `true` for crossings and zones, the destinations whose arrival is
    /// reported as an event.
    #[inline]
    pub fn is_geometry(&self) -> bool {
        matches!(self, Destination::Crossing(_) | Destination::TransitionZone(_))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Destination::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Destination::None              => "none",
            Destination::ExplicitGoal(_)   => "goal",
            Destination::Crossing(_)       => "crossing",
            Destination::TransitionZone(_) => "zone",
        }
    }
}

impl From<Vec2> for Destination {
    fn from(goal: Vec2) -> Self {
        Destination::ExplicitGoal(goal)
    }
}

impl From<Arc<Crossing>> for Destination {
    fn from(c: Arc<Crossing>) -> Self {
        Destination::Crossing(c)
    }
}

impl From<Arc<TransitionZone>> for Destination {
    fn from(z: Arc<TransitionZone>) -> Self {
        Destination::TransitionZone(z)
    }
}
