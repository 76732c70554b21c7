//! Force model and explicit integration.
//!
//! # Model
//!
//! ```text
//! F_goal = (v_desired - v) / τ          v_desired = ĝ · v_max · min(d / s, 1), or 0 within radius
//! F_wall = Σ n̂ · f(d)                   f(0) = U, f(r_w) = 0, monotone decreasing
//! F      = clamp(F_goal + F_wall, max_force)
//! a = F,  v ← clamp(v + a·dt, v_max),  p ← p + v·dt
//! ```
//!
//! Everything here is a pure function of its arguments.  Models implement
//! [`ForceModel::net_force`] only; clamping and integration live in [`step`]
//! so the force and speed bounds hold for every model.

use ps_core::{Vec2, WallContact};

use crate::params::PhysicalParams;

// ── Kinematics ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    pub position:     Vec2,
    pub velocity:     Vec2,
    pub acceleration: Vec2,
}

impl Kinematics {
    pub fn at_rest(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }
}

// ── WallDecay ─────────────────────────────────────────────────────────────────

/// How wall repulsion falls off between distance `0` and the repulsion radius.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallDecay {
    /// `U · (1 − d / r_w)`.
    #[default]
    Linear,
    /// `U · (e^(−k·d/r_w) − e^(−k)) / (1 − e^(−k))`.  Larger `sharpness`
    /// concentrates the force close to the wall.  `sharpness <= 0` behaves as
    /// `Linear`.
    Exponential { sharpness: f32 },
}

impl WallDecay {
    /// Repulsion magnitude at `distance` from a wall.
    ///
    /// Exactly `magnitude` at distance 0 (negative distances clamp to 0) and
    /// exactly 0 at or beyond `radius`.  A zero radius disables repulsion.
    pub fn magnitude(self, distance: f32, radius: f32, magnitude: f32) -> f32 {
        if radius <= 0.0 || magnitude <= 0.0 {
            return 0.0;
        }
        let d = distance.max(0.0);
        if d >= radius {
            return 0.0;
        }
        let t = d / radius;
        match self {
            WallDecay::Exponential { sharpness } if sharpness > 0.0 => {
                let floor = (-sharpness).exp();
                magnitude * (((-sharpness * t).exp() - floor) / (1.0 - floor))
            }
            _ => magnitude * (1.0 - t),
        }
    }
}

// ── Force terms ───────────────────────────────────────────────────────────────

/// Relaxation toward the desired velocity.
///
/// Desired speed is `max_speed` far from the goal and falls linearly to zero
/// over the last `slowing_distance` metres, so the agent arrives without
/// overshooting.  Inside `radius` it is zero and the agent only brakes.
pub fn goal_force(params: &PhysicalParams, kin: &Kinematics, goal: Vec2) -> Vec2 {
    let to_goal = goal - kin.position;
    let distance = to_goal.length();
    let desired = if distance <= params.radius {
        Vec2::ZERO
    } else {
        let speed = if params.slowing_distance > 0.0 {
            params.max_speed * (distance / params.slowing_distance).min(1.0)
        } else {
            params.max_speed
        };
        to_goal * (speed / distance)
    };
    (desired - kin.velocity) / params.relaxation_time
}

/// Repulsion from one wall contact, directed along its normal.
pub fn wall_force(params: &PhysicalParams, contact: &WallContact, decay: WallDecay) -> Vec2 {
    let m = decay.magnitude(
        contact.distance,
        params.wall_repulsion_radius,
        params.wall_repulsion_magnitude,
    );
    if m == 0.0 { Vec2::ZERO } else { contact.normal * m }
}

// ── ForceModel ────────────────────────────────────────────────────────────────

/// Pluggable net-force computation.
///
/// Implementations return the *unclamped* net force; [`step`] applies the
/// bounds.  The driver may call this for many agents in parallel, so
/// implementations must be `Send + Sync` and keep no per-agent state.
pub trait ForceModel: Send + Sync {
    fn net_force(
        &self,
        params: &PhysicalParams,
        kin:    &Kinematics,
        goal:   Vec2,
        walls:  &[WallContact],
    ) -> Vec2;
}

/// Goal relaxation plus summed wall repulsion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SocialForce {
    pub decay: WallDecay,
}

impl SocialForce {
    pub fn new(decay: WallDecay) -> Self {
        Self { decay }
    }
}

impl ForceModel for SocialForce {
    fn net_force(
        &self,
        params: &PhysicalParams,
        kin:    &Kinematics,
        goal:   Vec2,
        walls:  &[WallContact],
    ) -> Vec2 {
        walls
            .iter()
            .fold(goal_force(params, kin, goal), |acc, c| acc + wall_force(params, c, self.decay))
    }
}

// ── Integration ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepResult {
    pub kinematics: Kinematics,
    /// The clamped net force that was integrated.
    pub force:      Vec2,
}

/// One explicit Euler step under `model`.
pub fn step<M: ForceModel + ?Sized>(
    model:  &M,
    params: &PhysicalParams,
    kin:    &Kinematics,
    goal:   Vec2,
    walls:  &[WallContact],
    dt:     f32,
) -> StepResult {
    let force = model.net_force(params, kin, goal, walls).clamp_length_max(params.max_force);
    let acceleration = force;
    let velocity = (kin.velocity + acceleration * dt).clamp_length_max(params.max_speed);
    let position = kin.position + velocity * dt;
    StepResult {
        kinematics: Kinematics { position, velocity, acceleration },
        force,
    }
}
