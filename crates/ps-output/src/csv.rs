//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `trajectories.csv`
//! - `events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, TrajectoryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    trajectories: Writer<File>,
    events:       Writer<File>,
    summaries:    Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectories = Writer::from_path(dir.join("trajectories.csv"))?;
        trajectories.write_record(["tick", "time_secs", "agent_id", "x", "y", "vx", "vy"])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "agent_id", "kind", "detail", "sub_detail"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "time_secs", "active", "retired", "events", "no_target", "mean_speed",
        ])?;

        Ok(Self {
            trajectories,
            events,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.kind.to_string(),
                row.detail.to_string(),
                row.sub_detail.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.active.to_string(),
            row.retired.to_string(),
            row.events.to_string(),
            row.no_target.to_string(),
            row.mean_speed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
