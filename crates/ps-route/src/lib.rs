//! `ps-route`: where an agent is going and which point it steers toward.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`destination`] | `Destination`: tagged goal / crossing / zone             |
//! | [`path`]        | `PathFollower`, `PathState`: flat precomputed path       |
//! | [`sequence`]    | `Behaviour`, `BehaviourSequencer`, `SequenceState`        |
//! | [`resolver`]    | `Targeting`, `Resolution`, `GoalSource`                   |
//! | [`event`]       | `RouteEvent`: arrivals and completions                   |
//! | [`error`]       | `RouteError`, `RouteResult<T>`                            |
//!
//! # Precedence (summary)
//!
//! Each tick [`Targeting::resolve`] picks exactly one goal point:
//!
//! ```text
//! 1. path waypoint        (path attached and not exhausted)
//! 2. behaviour waypoint   (sequence attached and not completed)
//! 3. crossing / zone      (centroid of the vertex list)
//! 4. explicit goal        (or the last goal ever set)
//! 5. script end           (final waypoint of the attached sequence)
//! 6. current position     (hold; reported as NoTarget by the agent)
//! ```
//!
//! Reaching a waypoint advances the owning cursor by one position.  Cursors
//! never move backwards; only re-attaching a path or sequence restarts one.

pub mod destination;
pub mod error;
pub mod event;
pub mod path;
pub mod resolver;
pub mod sequence;


pub use destination::Destination;
pub use error::{RouteError, RouteResult};
pub use event::{NO_DETAIL, RouteEvent};
pub use path::{PathFollower, PathState};
pub use resolver::{GoalSource, Resolution, Targeting};
pub use sequence::{Behaviour, BehaviourSequencer, SequenceState};
