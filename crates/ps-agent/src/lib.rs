//! `ps-agent`: the single-pedestrian decision-and-kinematics unit.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`params`]      | `PhysicalParams`, named default constants                 |
//! | [`force`]       | `ForceModel`, `SocialForce`, `WallDecay`, `step`          |
//! | [`pedestrian`]  | `Pedestrian`, `AgentConfig`, `DisplayMeta`, `StepOutcome` |
//! | [`snapshot`]    | `KinematicSnapshot`, `AgentEvent`                         |
//! | [`store`]       | `AgentStore`: ordered agents plus an id index            |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//! | [`error`]       | `AgentError`, `NoTargetError`, `AgentResult<T>`           |
//!
//! # Per-tick update
//!
//! ```text
//! Pedestrian::step(model, walls, dt)
//!   ├─ Targeting::resolve     → goal point (+ route events)
//!   ├─ ForceModel::net_force  → unclamped force
//!   └─ force::step            → clamp |F| ≤ max_force, integrate, clamp |v| ≤ max_speed
//! ```
//!
//! The update reads only the agent's own state plus the wall contacts passed
//! in, so many agents can be stepped in parallel.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Use `rustc-hash` for the `AgentStore` id index.          |
//! | `serde`   | Derives `Serialize`/`Deserialize` on parameter types.    |

pub mod builder;
pub mod error;
pub mod force;
pub mod params;
pub mod pedestrian;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult, NoTargetError};
pub use force::{ForceModel, Kinematics, SocialForce, StepResult, WallDecay, goal_force, step, wall_force};
pub use params::PhysicalParams;
pub use pedestrian::{AgentConfig, DisplayMeta, Pedestrian, StepOutcome};
pub use snapshot::{AgentEvent, KinematicSnapshot};
pub use store::AgentStore;
