//! `ps-env`: static environment geometry and per-tick wall queries.
//!
//! The pedestrian core only consumes a list of [`WallContact`]s per agent per
//! tick; it never looks at wall geometry itself.  This crate is the driver-side
//! collaborator that turns scenario walls into those lists.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`wall`]    | `WallSegment`: closest point, distance, contact            |
//! | [`index`]   | `WallIndex` (R-tree), `WallIndexBuilder`                    |
//!
//! [`WallContact`]: ps_core::WallContact

pub mod index;
pub mod wall;


pub use index::{WallIndex, WallIndexBuilder};
pub use wall::{WallId, WallSegment};
