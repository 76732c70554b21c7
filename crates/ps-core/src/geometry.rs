//! 2-D geometry primitives: waypoints, crossings, transition zones, and the
//! per-tick wall contact record.
//!
//! All coordinates are single-precision metres in a local planar frame.
//! `Vec2` is re-exported from `glam` so downstream crates share one vector
//! type without depending on `glam` directly.
//!
//! # Reference points
//!
//! A crossing or zone is an ordered vertex list, not a single point.  When an
//! agent steers toward one, it steers toward the **centroid** of the vertex
//! list (the midpoint for a two-vertex crossing line).  The choice is fixed
//! here so every consumer agrees on it.

pub use glam::Vec2;

use crate::{CrossingId, ZoneId};

/// Arithmetic mean of `vertices`, or `None` for an empty list.
pub fn centroid(vertices: &[Vec2]) -> Option<Vec2> {
    if vertices.is_empty() {
        return None;
    }
    let sum = vertices.iter().fold(Vec2::ZERO, |acc, v| acc + *v);
    Some(sum / vertices.len() as f32)
}

// ── Crossing ──────────────────────────────────────────────────────────────────

/// A scenario entrance or exit, described by an ordered vertex list.
///
/// Immutable after load.  Agents hold it behind an `Arc` so one instance is
/// shared read-only by every agent targeting it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    id:       CrossingId,
    vertices: Vec<Vec2>,
}

impl Crossing {
    pub fn new(id: CrossingId, vertices: Vec<Vec2>) -> Self {
        Self { id, vertices }
    }

    #[inline]
    pub fn id(&self) -> CrossingId {
        self.id
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The point agents steer toward.  `None` only for empty geometry.
    pub fn reference_point(&self) -> Option<Vec2> {
        centroid(&self.vertices)
    }
}

// ── TransitionZone ────────────────────────────────────────────────────────────

/// A non-exit destination region (holding area, platform edge, …).
///
/// Same sharing and immutability contract as [`Crossing`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionZone {
    id:       ZoneId,
    vertices: Vec<Vec2>,
}

impl TransitionZone {
    pub fn new(id: ZoneId, vertices: Vec<Vec2>) -> Self {
        Self { id, vertices }
    }

    #[inline]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The point agents steer toward.  `None` only for empty geometry.
    pub fn reference_point(&self) -> Option<Vec2> {
        centroid(&self.vertices)
    }
}

// ── WallContact ───────────────────────────────────────────────────────────────

/// One nearby wall as seen from an agent's centre this tick.
///
/// Produced by the driver's spatial index before agent updates begin and
/// consumed read-only by the force model.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallContact {
    /// Distance from the agent centre to the closest point on the wall (m).
    pub distance: f32,
    /// Unit vector pointing from the wall toward the agent.
    pub normal: Vec2,
}

impl WallContact {
    #[inline]
    pub fn new(distance: f32, normal: Vec2) -> Self {
        Self { distance, normal }
    }
}
