//! `ps-core`: foundational types for the `pedsim` pedestrian micro-simulation.
//!
//! This crate is a dependency of every other `ps-*` crate.  It has no `ps-*`
//! dependencies and few external ones (`glam`, `rand`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CrossingId`, `ZoneId`                         |
//! | [`geometry`]    | `Vec2`, `Crossing`, `TransitionZone`, `WallContact`       |
//! | [`kind`]        | `AgentKind` enum                                          |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]         | `SimRng` (seeded, driver-side only)                       |
//! | [`error`]       | `PsError`, `PsResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PsError, PsResult};
pub use geometry::{Crossing, TransitionZone, Vec2, WallContact, centroid};
pub use ids::{AgentId, CrossingId, ZoneId};
pub use kind::AgentKind;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
