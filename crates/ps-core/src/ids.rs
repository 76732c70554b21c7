//! Typed ids for agents and scenario geometry.
//!
//! Each id is a `u32` newtype, so an agent id can never be passed where a
//! crossing id is expected.  Identity is assigned once by the
//! external scenario loader; the simulation core never allocates ids.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "not yet assigned".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Opaque pedestrian identity, fixed at creation.
    pub struct AgentId(u32);
}

typed_id! {
    /// Id of a scenario crossing (entrance / exit line).
    pub struct CrossingId(u32);
}

typed_id! {
    /// Id of a transition zone (holding area or other intermediate region).
    pub struct ZoneId(u32);
}
