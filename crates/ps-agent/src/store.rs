//! `AgentStore`: every live pedestrian, in a stable order, plus an id index.
//!
//! Agents live in one contiguous `Vec<Pedestrian>` so the driver can hand
//! `as_mut_slice()` straight to Rayon's `par_iter_mut()`.  Slot order is
//! insertion order and survives retirement (removal shifts, never swaps), so
//! the sequential apply phase always visits agents in the same order.

use ps_core::AgentId;

use crate::error::{AgentError, AgentResult};
use crate::pedestrian::Pedestrian;
use crate::snapshot::KinematicSnapshot;

#[cfg(feature = "fx-hash")]
type IdIndex = rustc_hash::FxHashMap<AgentId, usize>;
#[cfg(not(feature = "fx-hash"))]
type IdIndex = std::collections::HashMap<AgentId, usize>;

#[derive(Default)]
pub struct AgentStore {
    agents: Vec<Pedestrian>,
    index:  IdIndex,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { agents: Vec::with_capacity(n), index: IdIndex::default() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Append an agent.
    ///
    /// # Errors
    ///
    /// `AgentError::InvalidId` for `AgentId::INVALID`;
    /// `AgentError::DuplicateId` if an agent with the same id is present.
    pub fn insert(&mut self, agent: Pedestrian) -> AgentResult<()> {
        let id = agent.id();
        if !id.is_valid() {
            return Err(AgentError::InvalidId(id));
        }
        if self.index.contains_key(&id) {
            return Err(AgentError::DuplicateId(id));
        }
        self.index.insert(id, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Pedestrian> {
        self.index.get(&id).map(|&slot| &self.agents[slot])
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Pedestrian> {
        let slot = *self.index.get(&id)?;
        self.agents.get_mut(slot)
    }

    /// Remove every agent in `ids`; unknown ids are ignored.  Returns how
    /// many were removed.
    pub fn retire(&mut self, ids: &[AgentId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.agents.len();
        self.agents.retain(|a| !ids.contains(&a.id()));
        let removed = before - self.agents.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (slot, a) in self.agents.iter().enumerate() {
            self.index.insert(a.id(), slot);
        }
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    pub fn iter(&self) -> std::slice::Iter<'_, Pedestrian> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Pedestrian> {
        self.agents.iter_mut()
    }

    pub fn as_slice(&self) -> &[Pedestrian] {
        &self.agents
    }

    /// Mutable slice for the parallel update phase.  Ids cannot change
    /// through it, so the index stays valid.
    pub fn as_mut_slice(&mut self) -> &mut [Pedestrian] {
        &mut self.agents
    }

    /// Ids in slot order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(Pedestrian::id)
    }

    /// Current `{id, position, velocity}` for every agent, in slot order.
    pub fn snapshots(&self) -> Vec<KinematicSnapshot> {
        self.agents.iter().map(Pedestrian::snapshot).collect()
    }
}
