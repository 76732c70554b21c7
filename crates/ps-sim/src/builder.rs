//! Fluent builder for constructing a [`Sim`].

use ps_agent::{AgentStore, ForceModel};
use ps_core::SimConfig;
use ps_env::WallIndex;

use crate::{RetirePolicy, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: dt, total ticks, seed, threads, snapshot interval
/// - [`AgentStore`]: from [`ps_agent::AgentStoreBuilder`]
/// - `M: ForceModel`: usually [`ps_agent::SocialForce`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                  |
/// |----------------------|--------------------------|
/// | `.walls(w)`          | `WallIndex::empty()`     |
/// | `.retire_policy(p)`  | `RetirePolicy::Never`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, agents, SocialForce::default())
///     .walls(walls)
///     .retire_policy(RetirePolicy::OnDestinationReached)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: ForceModel> {
    config: SimConfig,
    agents: AgentStore,
    model:  M,
    walls:  Option<WallIndex>,
    retire: RetirePolicy,
}

impl<M: ForceModel> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore, model: M) -> Self {
        Self {
            config,
            agents,
            model,
            walls:  None,
            retire: RetirePolicy::default(),
        }
    }

    /// Supply the static walls.  Without them agents feel no repulsion.
    pub fn walls(mut self, walls: WallIndex) -> Self {
        self.walls = Some(walls);
        self
    }

    pub fn retire_policy(mut self, policy: RetirePolicy) -> Self {
        self.retire = policy;
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// `SimError::Config` if `dt_secs` is not finite and positive or
    /// `num_threads` is `Some(0)`.
    pub fn build(self) -> SimResult<Sim<M>> {
        let dt = self.config.dt_secs;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::Config(format!("dt_secs must be finite and > 0, got {dt}")));
        }
        if self.config.num_threads == Some(0) {
            return Err(SimError::Config("num_threads must be at least 1".into()));
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None    => None,
        };

        Ok(Sim {
            clock:         self.config.make_clock(),
            config:        self.config,
            agents:        self.agents,
            walls:         self.walls.unwrap_or_else(WallIndex::empty),
            model:         self.model,
            retire_policy: self.retire,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
