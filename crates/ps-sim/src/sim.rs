//! The `Sim` struct and its tick loop.

use ps_agent::{AgentEvent, AgentStore, ForceModel, Pedestrian, StepOutcome};
use ps_core::{AgentId, PsError, SimClock, SimConfig, Tick, Vec2, WallContact};
use ps_env::WallIndex;
use ps_route::{Behaviour, Destination};

use crate::{SimObserver, SimResult, TickStats};

/// When the driver removes an agent from the store.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RetirePolicy {
    /// Agents stay until the caller removes them.
    #[default]
    Never,
    /// Retire an agent in the tick it reaches its crossing or zone.
    OnDestinationReached,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M>` owns the agents, the static walls, and the force model, and
/// drives the three-phase tick loop described in the crate docs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: ForceModel> {
    /// Global configuration (dt, total ticks, seed, …).
    pub config: SimConfig,

    /// Current tick and the tick-to-seconds mapping.
    pub clock: SimClock,

    /// Every live pedestrian, in stable slot order.
    pub agents: AgentStore,

    /// Static walls, queried once per agent per tick.
    pub walls: WallIndex,

    /// Net-force model shared by every agent.
    pub model: M,

    pub retire_policy: RetirePolicy,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<M: ForceModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::info!(
            "running {} agents from {} to {} (dt = {} s)",
            self.agents.len(),
            self.clock.current_tick,
            self.config.end_tick(),
            self.config.dt_secs
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick(now, observer);
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
        log::info!("finished at {} with {} agents active", self.clock.current_tick, self.agents.len());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick(now, observer);
            self.clock.advance();
        }
        Ok(())
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn agent(&self, id: AgentId) -> Option<&Pedestrian> {
        self.agents.get(id)
    }

    // ── Replanning ────────────────────────────────────────────────────────

    /// Give agent `id` a new destination.
    ///
    /// # Errors
    ///
    /// `PsError::AgentNotFound` for an unknown id; `AgentError::Reference`
    /// for empty geometry (the old destination is kept).
    pub fn reassign(&mut self, id: AgentId, destination: Destination) -> SimResult<()> {
        self.agent_mut(id)?.assign_destination(destination)?;
        Ok(())
    }

    /// Replace agent `id`'s path.
    pub fn attach_path(&mut self, id: AgentId, waypoints: Vec<Vec2>) -> SimResult<()> {
        self.agent_mut(id)?.attach_path(waypoints);
        Ok(())
    }

    /// Replace agent `id`'s behaviour sequence.
    pub fn attach_behaviours(&mut self, id: AgentId, behaviours: Vec<Behaviour>) -> SimResult<()> {
        self.agent_mut(id)?.attach_behaviours(behaviours);
        Ok(())
    }

    fn agent_mut(&mut self, id: AgentId) -> SimResult<&mut Pedestrian> {
        Ok(self.agents.get_mut(id).ok_or(PsError::AgentNotFound(id))?)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);

        // ── Phase 1: environment snapshot ─────────────────────────────────
        let contacts = self.collect_contacts();

        // ── Phase 2: per-agent update ─────────────────────────────────────
        let outcomes = self.step_agents(&contacts);

        // ── Phase 3: apply (sequential, store order) ──────────────────────
        let mut stats = TickStats::default();
        let mut retiring: Vec<AgentId> = Vec::new();
        for (agent, outcome) in self.agents.iter().zip(outcomes) {
            let id = agent.id();
            if outcome.no_target.is_some() {
                stats.no_target += 1;
            }
            for event in outcome.events {
                stats.events += 1;
                observer.on_event(now, &AgentEvent { agent: id, event });
                if event.is_destination_reached()
                    && self.retire_policy == RetirePolicy::OnDestinationReached
                {
                    retiring.push(id);
                }
            }
        }

        let stepped = self.agents.len();
        if stepped > 0 {
            let total: f32 = self.agents.iter().map(|a| a.velocity().length()).sum();
            stats.mean_speed = total / stepped as f32;
        }

        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.agents.snapshots());
        }

        stats.retired = self.agents.retire(&retiring);
        if stats.retired > 0 {
            log::debug!("{now}: retired {} agent(s)", stats.retired);
        }
        stats.active = self.agents.len();

        observer.on_tick_end(now, &stats);
    }

    /// Wall contacts within each agent's repulsion radius, in store order.
    fn collect_contacts(&self) -> Vec<Vec<WallContact>> {
        let walls = &self.walls;
        let contacts_for = |a: &Pedestrian| walls.contacts(a.position(), a.params().wall_repulsion_radius);

        #[cfg(not(feature = "parallel"))]
        {
            self.agents.iter().map(contacts_for).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let agents = self.agents.as_slice();
            let work = || agents.par_iter().map(contacts_for).collect::<Vec<_>>();
            match &self.pool {
                Some(pool) => pool.install(work),
                None       => work(),
            }
        }
    }

    /// Step every agent against its own contact list.
    ///
    /// With the `parallel` Cargo feature the agents are split across Rayon's
    /// thread pool; each thread gets disjoint `&mut Pedestrian`s.
    fn step_agents(&mut self, contacts: &[Vec<WallContact>]) -> Vec<StepOutcome> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model  = &self.model;
        let dt     = self.config.dt_secs;
        let agents = self.agents.as_mut_slice();

        #[cfg(not(feature = "parallel"))]
        {
            agents
                .iter_mut()
                .zip(contacts)
                .map(|(agent, walls)| agent.step(model, walls, dt))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut work = move || {
                agents
                    .par_iter_mut()
                    .zip(contacts.par_iter())
                    .map(|(agent, walls)| agent.step(model, walls, dt))
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None       => work(),
            }
        }
    }
}
