//! Straight wall segments.

use ps_core::{Vec2, WallContact};

/// Index of a wall segment inside a [`WallIndex`][crate::WallIndex].
pub type WallId = u32;

/// A straight, two-sided wall from `a` to `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl WallSegment {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Closest point on the segment to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq < f32::EPSILON {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        p.distance(self.closest_point(p))
    }

    /// Contact record for an agent centred at `p`.
    ///
    /// When `p` lies exactly on the wall the direction is undefined; the
    /// segment's left-hand normal is used instead (or +X for a degenerate
    /// point-wall).
    pub fn contact(&self, p: Vec2) -> WallContact {
        let closest = self.closest_point(p);
        let offset = p - closest;
        let distance = offset.length();
        let normal = if distance > f32::EPSILON {
            offset / distance
        } else {
            (self.b - self.a).perp().try_normalize().unwrap_or(Vec2::X)
        };
        WallContact::new(distance, normal)
    }
}
