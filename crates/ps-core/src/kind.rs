//! Agent kind tag.
//!
//! Every simulated agent shares one kinematic type; the only per-kind
//! difference is the default physical parameter set, which `ps-agent` looks up
//! from this tag.  New kinds are added as variants, not as new agent types.

/// The category of a simulated agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum AgentKind {
    /// A person on foot.
    #[default]
    Pedestrian,
}

impl AgentKind {
    /// Human-readable label, useful for CSV/Parquet column values.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Pedestrian => "pedestrian",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
