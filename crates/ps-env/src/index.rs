//! R-tree wall index and builder.
//!
//! # Spatial index
//!
//! Every wall segment is stored in an R-tree (via `rstar`) keyed by its
//! bounding box.  A per-agent query returns every segment whose closest
//! point lies within the agent's wall-repulsion radius, so the cost per
//! agent is proportional to the walls actually nearby rather than to the
//! size of the scenario.
//!
//! The index is built once at load and is read-only afterwards, so the
//! driver can query it from many threads during the environment phase.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ps_core::{PsError, PsResult, Vec2, WallContact};

use crate::wall::{WallId, WallSegment};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: one segment plus its `WallId`.
#[derive(Clone)]
struct WallEntry {
    segment: WallSegment,
    id:      WallId,
}

impl RTreeObject for WallEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.segment.a.to_array(), self.segment.b.to_array())
    }
}

impl PointDistance for WallEntry {
    /// Squared Euclidean distance from `point` to the closest point on the
    /// segment.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let p = Vec2::from_array(*point);
        p.distance_squared(self.segment.closest_point(p))
    }
}

// ── WallIndex ─────────────────────────────────────────────────────────────────

/// All static walls of a scenario plus an R-tree over them.
///
/// Do not construct directly; use [`WallIndexBuilder`].
pub struct WallIndex {
    /// Segments indexed by `WallId`.
    pub segments: Vec<WallSegment>,

    tree: RTree<WallEntry>,
}

impl WallIndex {
    /// An index with no walls.  Every query returns an empty contact list.
    pub fn empty() -> Self {
        Self { segments: Vec::new(), tree: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a [`WallContact`] to `out` for every wall whose closest point
    /// is strictly within `radius` of `position`.
    ///
    /// `out` is not cleared, so a caller can reuse one buffer across agents.
    /// Contacts are ordered by ascending `WallId` so the force sum is
    /// independent of R-tree traversal order.
    pub fn contacts_into(&self, position: Vec2, radius: f32, out: &mut Vec<WallContact>) {
        if radius <= 0.0 || self.segments.is_empty() {
            return;
        }
        let mut hits: Vec<&WallEntry> = self
            .tree
            .locate_within_distance(position.to_array(), radius * radius)
            .collect();
        hits.sort_unstable_by_key(|e| e.id);
        out.extend(
            hits.into_iter()
                .map(|e| e.segment.contact(position))
                .filter(|c| c.distance < radius),
        );
    }

    /// Convenience form of [`contacts_into`](Self::contacts_into).
    pub fn contacts(&self, position: Vec2, radius: f32) -> Vec<WallContact> {
        let mut out = Vec::new();
        self.contacts_into(position, radius, &mut out);
        out
    }

    /// The wall nearest to `position`, if any.
    pub fn nearest(&self, position: Vec2) -> Option<(WallId, f32)> {
        self.tree
            .nearest_neighbor(&position.to_array())
            .map(|e| (e.id, e.segment.distance_to(position)))
    }
}

// ── WallIndexBuilder ──────────────────────────────────────────────────────────

/// Collect walls, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ps_core::Vec2;
/// use ps_env::WallIndexBuilder;
///
/// let mut b = WallIndexBuilder::new();
/// b.add_polyline(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 5.0)]);
/// let walls = b.build().unwrap();
/// assert_eq!(walls.len(), 2);
/// ```
#[derive(Default)]
pub struct WallIndexBuilder {
    segments: Vec<WallSegment>,
}

impl WallIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one straight wall and return its `WallId` (sequential from 0).
    pub fn add_wall(&mut self, a: Vec2, b: Vec2) -> WallId {
        let id = self.segments.len() as WallId;
        self.segments.push(WallSegment::new(a, b));
        id
    }

    /// Add one wall per consecutive vertex pair of an open polyline.
    /// Polylines with fewer than two vertices add nothing.
    pub fn add_polyline(&mut self, vertices: &[Vec2]) {
        for pair in vertices.windows(2) {
            self.add_wall(pair[0], pair[1]);
        }
    }

    pub fn wall_count(&self) -> usize {
        self.segments.len()
    }

    /// Validate coordinates and bulk-load the R-tree.
    ///
    /// # Errors
    ///
    /// `PsError::Config` if any wall endpoint is not finite.
    pub fn build(self) -> PsResult<WallIndex> {
        if let Some((i, _)) = self
            .segments
            .iter()
            .enumerate()
            .find(|(_, s)| !s.a.is_finite() || !s.b.is_finite())
        {
            return Err(PsError::Config(format!("wall {i} has a non-finite endpoint")));
        }

        let entries: Vec<WallEntry> = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, &segment)| WallEntry { segment, id: i as WallId })
            .collect();
        let tree = RTree::bulk_load(entries);

        Ok(WallIndex { segments: self.segments, tree })
    }
}
