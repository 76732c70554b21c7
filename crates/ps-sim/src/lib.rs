//! `ps-sim`: the external driver that advances every pedestrian one tick at
//! a time.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Environment   wall contacts for every agent from the read-only
//!                   WallIndex (parallel with the `parallel` feature).
//!   ② Update        Pedestrian::step for every agent against its own
//!                   contact list (parallel with the `parallel` feature).
//!   ③ Apply         sequential, in store order:
//!                   route events → observer
//!                   snapshot     → observer (every output_interval_ticks)
//!                   arrival      → retire (RetirePolicy::OnDestinationReached)
//! ```
//!
//! Phase ② touches only per-agent state, so its result is identical whether
//! it ran on one thread or many.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phases ① and ② on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the agent id index (forwarded to ps-agent). |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ps_agent::{AgentConfig, AgentStoreBuilder, SocialForce};
//! use ps_core::SimConfig;
//! use ps_sim::{NoopObserver, SimBuilder};
//!
//! let agents = AgentStoreBuilder::new().agents(configs).build()?;
//! let mut sim = SimBuilder::new(SimConfig::default(), agents, SocialForce::default())
//!     .walls(walls)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::{RetirePolicy, Sim};
