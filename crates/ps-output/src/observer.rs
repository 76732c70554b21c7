//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ps_agent::{AgentEvent, KinematicSnapshot};
use ps_core::{SimClock, SimConfig, Tick};
use ps_sim::{SimObserver, TickStats};

use crate::OutputError;
use crate::row::{EventRow, TickSummaryRow, TrajectoryRow};
use crate::writer::OutputWriter;

/// A [`SimObserver`] that writes trajectories, route events, and tick
/// summaries to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Events are buffered for the current tick and written as one batch when
/// the tick ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    events:     Vec<EventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config.dt_secs` to stamp
    /// rows with simulated time.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            events:     Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &AgentEvent) {
        self.events.push(EventRow {
            tick:       tick.0,
            agent_id:   event.agent.0,
            kind:       event.event.as_str(),
            detail:     event.event.detail(),
            sub_detail: event.event.sub_detail(),
        });
    }

    fn on_snapshot(&mut self, tick: Tick, snapshots: &[KinematicSnapshot]) {
        let time_secs = self.clock.secs_at(tick);
        let rows: Vec<TrajectoryRow> = snapshots
            .iter()
            .map(|s| TrajectoryRow {
                tick:     tick.0,
                time_secs,
                agent_id: s.agent.0,
                x:        s.position.x,
                y:        s.position.y,
                vx:       s.velocity.x,
                vy:       s.velocity.y,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_trajectories(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        if !self.events.is_empty() {
            let events = std::mem::take(&mut self.events);
            let result = self.writer.write_events(&events);
            self.store_err(result);
        }

        let row = TickSummaryRow {
            tick:       tick.0,
            time_secs:  self.clock.secs_at(tick),
            active:     stats.active as u64,
            retired:    stats.retired as u64,
            events:     stats.events as u64,
            no_target:  stats.no_target as u64,
            mean_speed: stats.mean_speed,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
