//! Physical parameters and their named defaults.

use ps_core::AgentKind;

use crate::error::{AgentError, AgentResult};

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Body radius (m).  Also the arrival threshold for waypoints and goals.
pub const DEFAULT_RADIUS: f32 = 0.25;
/// Velocity relaxation time constant (s).
pub const DEFAULT_RELAXATION_TIME: f32 = 0.5;
/// Walls farther than this (m) exert no force.
pub const DEFAULT_WALL_REPULSION_RADIUS: f32 = 0.6;
/// Wall force magnitude at contact distance zero.
pub const DEFAULT_WALL_REPULSION_MAGNITUDE: f32 = 2.0;
/// Upper bound on the net force magnitude (unit mass).
pub const DEFAULT_MAX_FORCE: f32 = 5.0;
/// Distance (m) from a final goal inside which desired speed tapers to zero.
pub const DEFAULT_SLOWING_DISTANCE: f32 = 2.0;

// ── PhysicalParams ────────────────────────────────────────────────────────────

/// Per-agent constants fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalParams {
    pub radius:                   f32,
    pub relaxation_time:          f32,
    pub wall_repulsion_radius:    f32,
    pub wall_repulsion_magnitude: f32,
    pub max_force:                f32,
    pub max_speed:                f32,
    /// Zero disables the taper.
    pub slowing_distance:         f32,
}

impl PhysicalParams {
    /// Named defaults for `kind` with the given top speed.  Every kind
    /// currently shares the pedestrian table.
    pub fn for_kind(_kind: AgentKind, max_speed: f32) -> Self {
        Self {
            radius:                   DEFAULT_RADIUS,
            relaxation_time:          DEFAULT_RELAXATION_TIME,
            wall_repulsion_radius:    DEFAULT_WALL_REPULSION_RADIUS,
            wall_repulsion_magnitude: DEFAULT_WALL_REPULSION_MAGNITUDE,
            max_force:                DEFAULT_MAX_FORCE,
            max_speed,
            slowing_distance:         DEFAULT_SLOWING_DISTANCE,
        }
    }

    /// The same parameters with the arrival taper switched off, for
    /// waypoints the agent passes through rather than stops at.
    pub fn cruising(&self) -> Self {
        Self { slowing_distance: 0.0, ..*self }
    }

    /// Check every range invariant.
    ///
    /// # Errors
    ///
    /// `AgentError::Configuration` naming the first offending parameter:
    /// `radius` and `relaxation_time` must be finite and `> 0`, the rest
    /// finite and `>= 0`.
    pub fn validate(&self) -> AgentResult<()> {
        positive("radius", self.radius)?;
        positive("relaxation_time", self.relaxation_time)?;
        non_negative("wall_repulsion_radius", self.wall_repulsion_radius)?;
        non_negative("wall_repulsion_magnitude", self.wall_repulsion_magnitude)?;
        non_negative("max_force", self.max_force)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("slowing_distance", self.slowing_distance)
    }
}

fn positive(param: &'static str, value: f32) -> AgentResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AgentError::Configuration { param, value })
    }
}

fn non_negative(param: &'static str, value: f32) -> AgentResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AgentError::Configuration { param, value })
    }
}
