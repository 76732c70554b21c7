//! Fluent builder for constructing an `AgentStore` from agent configs.
//!
//! # Usage
//!
//! ```rust
//! use ps_agent::{AgentConfig, AgentStoreBuilder};
//! use ps_core::{AgentId, Vec2};
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(AgentConfig::new(AgentId(0), Vec2::ZERO, 1.3).goal(Vec2::new(10.0, 0.0)))
//!     .agent(AgentConfig::new(AgentId(1), Vec2::Y, 1.5).goal(Vec2::new(10.0, 1.0)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.len(), 2);
//! ```

use crate::error::AgentResult;
use crate::pedestrian::{AgentConfig, Pedestrian};
use crate::store::AgentStore;

/// Collects [`AgentConfig`]s; every one is validated in [`build`](Self::build).
#[derive(Default)]
pub struct AgentStoreBuilder {
    configs: Vec<AgentConfig>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, config: AgentConfig) -> Self {
        self.configs.push(config);
        self
    }

    pub fn agents(mut self, configs: impl IntoIterator<Item = AgentConfig>) -> Self {
        self.configs.extend(configs);
        self
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Create every agent in insertion order.
    ///
    /// # Errors
    ///
    /// The first construction or duplicate-id error; no partial store is
    /// returned.
    pub fn build(self) -> AgentResult<AgentStore> {
        let mut store = AgentStore::with_capacity(self.configs.len());
        for config in self.configs {
            store.insert(Pedestrian::new(config)?)?;
        }
        Ok(store)
    }
}
