//! Per-tick records handed to renderers, publishers, and output writers.

use ps_core::{AgentId, Vec2};
use ps_route::RouteEvent;

/// `{agent, position, velocity}` after an update.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicSnapshot {
    pub agent:    AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl KinematicSnapshot {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// A route event tagged with the agent that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AgentEvent {
    pub agent: AgentId,
    pub event: RouteEvent,
}
