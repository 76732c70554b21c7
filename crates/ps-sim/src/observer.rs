//! Simulation observer trait for progress reporting and data collection.

use ps_agent::{AgentEvent, KinematicSnapshot};
use ps_core::Tick;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Agents still in the store after this tick's retirements.
    pub active:     usize,
    /// Agents retired this tick.
    pub retired:    usize,
    /// Route events emitted this tick.
    pub events:     usize,
    /// Agents that had nothing to steer toward.
    pub no_target:  usize,
    /// Mean speed over every agent stepped this tick (0 when none were).
    pub mean_speed: f32,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} active", stats.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per route event during the apply phase, in store order.
    fn on_event(&mut self, _tick: Tick, _event: &AgentEvent) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the post-update state of every agent stepped this tick,
    /// including any about to be retired.
    fn on_snapshot(&mut self, _tick: Tick, _snapshots: &[KinematicSnapshot]) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
