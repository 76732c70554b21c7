//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing integer `Tick` counter.  The mapping to
//! simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * dt_secs
//!
//! Keeping the canonical counter integral means tick comparisons and output
//! intervals are exact; only the physics sees the floating-point `dt`.
//! Pedestrian dynamics want sub-second steps, so the default `dt` is 0.1 s.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Step counter since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The run's position in time and the tick-to-seconds mapping.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Integration step (s).
    pub dt_secs: f32,
    /// Tick currently being processed; the driver moves it with `advance`.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Simulated seconds since tick 0.  Computed in `f64` from the integer
    /// tick so long runs do not accumulate summation drift.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Simulated seconds at an arbitrary tick.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.dt_secs as f64
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-wide settings: step size, length, seed, threading, snapshot cadence.
///
/// Scenario files deserialize straight into this (with the `serde` feature).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Integration step in seconds.  Must be finite and > 0.
    pub dt_secs: f32,

    /// Run length in ticks.
    pub total_ticks: u64,

    /// Seed for scenario generation (spawn positions, speeds).
    pub seed: u64,

    /// Rayon pool size for the per-agent phase.  `None` means the global pool.
    pub num_threads: Option<usize>,

    /// Emit kinematic snapshots every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:               0.1,
            total_ticks:           600,
            seed:                  0,
            num_threads:           None,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// First tick that is *not* simulated.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }
}
