//! The pedestrian aggregate and its construction record.

use std::sync::Arc;

use ps_core::{AgentId, AgentKind, Crossing, TransitionZone, Vec2, WallContact};
use ps_route::{Behaviour, Destination, Resolution, RouteEvent, Targeting};

use crate::error::{AgentError, AgentResult, NoTargetError};
use crate::force::{self, ForceModel, Kinematics};
use crate::params::PhysicalParams;
use crate::snapshot::KinematicSnapshot;

// ── DisplayMeta ───────────────────────────────────────────────────────────────

/// Opaque rendering tag (colour index, sprite id, …).  Carried, never read.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayMeta(pub u32);

// ── AgentConfig ───────────────────────────────────────────────────────────────

/// Everything needed to create a [`Pedestrian`], with named optional fields.
///
/// # Example
///
/// ```
/// use ps_agent::{AgentConfig, Pedestrian};
/// use ps_core::{AgentId, Vec2};
///
/// let ped = Pedestrian::new(
///     AgentConfig::new(AgentId(0), Vec2::ZERO, 1.4)
///         .goal(Vec2::new(10.0, 0.0))
///         .relaxation_time(0.4),
/// )
/// .unwrap();
/// assert_eq!(ped.params().relaxation_time, 0.4);
/// ```
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub id:        AgentId,
    pub kind:      AgentKind,
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub max_speed: f32,

    // ── Parameter overrides (kind defaults when `None`) ───────────────────
    pub radius:                   Option<f32>,
    pub relaxation_time:          Option<f32>,
    pub wall_repulsion_radius:    Option<f32>,
    pub wall_repulsion_magnitude: Option<f32>,
    pub max_force:                Option<f32>,
    pub slowing_distance:         Option<f32>,

    // ── Targeting ─────────────────────────────────────────────────────────
    pub destination: Destination,
    pub path:        Option<Vec<Vec2>>,
    pub behaviours:  Vec<Behaviour>,

    pub display: Option<DisplayMeta>,
}

impl AgentConfig {
    pub fn new(id: AgentId, position: Vec2, max_speed: f32) -> Self {
        Self {
            id,
            kind: AgentKind::default(),
            position,
            velocity: Vec2::ZERO,
            max_speed,
            radius: None,
            relaxation_time: None,
            wall_repulsion_radius: None,
            wall_repulsion_magnitude: None,
            max_force: None,
            slowing_distance: None,
            destination: Destination::None,
            path: None,
            behaviours: Vec::new(),
            display: None,
        }
    }

    pub fn kind(mut self, kind: AgentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn relaxation_time(mut self, secs: f32) -> Self {
        self.relaxation_time = Some(secs);
        self
    }

    pub fn wall_repulsion(mut self, radius: f32, magnitude: f32) -> Self {
        self.wall_repulsion_radius = Some(radius);
        self.wall_repulsion_magnitude = Some(magnitude);
        self
    }

    pub fn max_force(mut self, max_force: f32) -> Self {
        self.max_force = Some(max_force);
        self
    }

    /// Distance from a final goal at which the agent starts slowing; zero
    /// keeps full speed until the arrival radius.
    pub fn slowing_distance(mut self, metres: f32) -> Self {
        self.slowing_distance = Some(metres);
        self
    }

    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn goal(self, goal: Vec2) -> Self {
        self.destination(Destination::ExplicitGoal(goal))
    }

    pub fn crossing(self, crossing: Arc<Crossing>) -> Self {
        self.destination(Destination::Crossing(crossing))
    }

    pub fn zone(self, zone: Arc<TransitionZone>) -> Self {
        self.destination(Destination::TransitionZone(zone))
    }

    pub fn path(mut self, waypoints: Vec<Vec2>) -> Self {
        self.path = Some(waypoints);
        self
    }

    pub fn behaviours(mut self, behaviours: Vec<Behaviour>) -> Self {
        self.behaviours = behaviours;
        self
    }

    pub fn display(mut self, meta: DisplayMeta) -> Self {
        self.display = Some(meta);
        self
    }

    /// Kind defaults with every override applied.
    pub fn params(&self) -> PhysicalParams {
        let d = PhysicalParams::for_kind(self.kind, self.max_speed);
        PhysicalParams {
            radius:                   self.radius.unwrap_or(d.radius),
            relaxation_time:          self.relaxation_time.unwrap_or(d.relaxation_time),
            wall_repulsion_radius:    self.wall_repulsion_radius.unwrap_or(d.wall_repulsion_radius),
            wall_repulsion_magnitude: self.wall_repulsion_magnitude.unwrap_or(d.wall_repulsion_magnitude),
            max_force:                self.max_force.unwrap_or(d.max_force),
            max_speed:                d.max_speed,
            slowing_distance:         self.slowing_distance.unwrap_or(d.slowing_distance),
        }
    }
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What one [`Pedestrian::step`] produced besides the new kinematics.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// The goal steered toward and where it came from.
    pub resolution: Resolution,
    /// Clamped net force integrated this tick.
    pub force:      Vec2,
    /// Route progress, in the order it happened.
    pub events:     Vec<RouteEvent>,
    /// Set when nothing supplied a goal and the agent held.
    pub no_target:  Option<NoTargetError>,
}

// ── Pedestrian ────────────────────────────────────────────────────────────────

/// One simulated pedestrian: identity, fixed parameters, kinematics, and
/// targeting.
///
/// The core never retires an agent; the driver does, usually after a
/// crossing or zone arrival event.
#[derive(Clone, Debug)]
pub struct Pedestrian {
    id:        AgentId,
    kind:      AgentKind,
    params:    PhysicalParams,
    kin:       Kinematics,
    targeting: Targeting,
    display:   Option<DisplayMeta>,
}

impl Pedestrian {
    /// Validate `config` and create the agent.
    ///
    /// # Errors
    ///
    /// - `AgentError::Configuration` for an out-of-range parameter or a
    ///   non-finite initial position/velocity.
    /// - `AgentError::Reference` for a crossing or zone with no vertices.
    pub fn new(config: AgentConfig) -> AgentResult<Self> {
        let params = config.params();
        params.validate()?;
        finite_vec("position", config.position)?;
        finite_vec("velocity", config.velocity)?;

        let mut targeting = Targeting::new();
        targeting.assign_destination(config.destination)?;
        if let Some(path) = config.path {
            targeting.attach_path(path);
        }
        if !config.behaviours.is_empty() {
            targeting.attach_behaviours(config.behaviours);
        }

        let kin = Kinematics {
            position:     config.position,
            velocity:     config.velocity.clamp_length_max(params.max_speed),
            acceleration: Vec2::ZERO,
        };

        Ok(Self {
            id: config.id,
            kind: config.kind,
            params,
            kin,
            targeting,
            display: config.display,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn params(&self) -> &PhysicalParams {
        &self.params
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kin
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.kin.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.kin.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.kin.acceleration
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    pub fn display(&self) -> Option<DisplayMeta> {
        self.display
    }

    pub fn snapshot(&self) -> KinematicSnapshot {
        KinematicSnapshot {
            agent:    self.id,
            position: self.kin.position,
            velocity: self.kin.velocity,
        }
    }

    // ── Replanning ────────────────────────────────────────────────────────

    /// Replace the destination.  On error the old one is kept.
    pub fn assign_destination(&mut self, destination: Destination) -> AgentResult<()> {
        self.targeting.assign_destination(destination)?;
        Ok(())
    }

    pub fn set_goal(&mut self, goal: Vec2) -> AgentResult<()> {
        self.assign_destination(Destination::ExplicitGoal(goal))
    }

    /// Replace the path; its cursor starts at the first waypoint.
    pub fn attach_path(&mut self, waypoints: Vec<Vec2>) {
        self.targeting.attach_path(waypoints);
    }

    pub fn clear_path(&mut self) {
        self.targeting.clear_path();
    }

    /// Replace the behaviour sequence; it restarts at `NotStarted`.
    pub fn attach_behaviours(&mut self, behaviours: Vec<Behaviour>) {
        self.targeting.attach_behaviours(behaviours);
    }

    pub fn clear_behaviours(&mut self) {
        self.targeting.clear_behaviours();
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Resolve this tick's goal without integrating.
    pub fn resolve_goal(&mut self, events: &mut Vec<RouteEvent>) -> Resolution {
        self.targeting.resolve(self.kin.position, self.params.radius, events)
    }

    /// Advance one tick of `dt` seconds against the supplied wall contacts.
    pub fn step<M: ForceModel + ?Sized>(
        &mut self,
        model: &M,
        walls: &[WallContact],
        dt:    f32,
    ) -> StepOutcome {
        let mut events = Vec::new();
        let resolution = self.resolve_goal(&mut events);
        let no_target = if resolution.has_target() {
            None
        } else {
            let diag = NoTargetError(self.id);
            log::debug!("{diag}");
            Some(diag)
        };

        let params = if resolution.is_waypoint() { self.params.cruising() } else { self.params };
        let result = force::step(model, &params, &self.kin, resolution.goal, walls, dt);
        self.kin = result.kinematics;

        StepOutcome { resolution, force: result.force, events, no_target }
    }
}

fn finite_vec(param: &'static str, v: Vec2) -> AgentResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        let value = if v.x.is_finite() { v.y } else { v.x };
        Err(AgentError::Configuration { param, value })
    }
}
