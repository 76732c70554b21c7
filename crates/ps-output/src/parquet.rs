//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `trajectories.parquet`
//! - `events.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float32Builder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, TrajectoryRow};

fn trajectory_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("time_secs", DataType::Float64, false),
        Field::new("agent_id",  DataType::UInt32,  false),
        Field::new("x",         DataType::Float32, false),
        Field::new("y",         DataType::Float32, false),
        Field::new("vx",        DataType::Float32, false),
        Field::new("vy",        DataType::Float32, false),
    ]))
}

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",       DataType::UInt64, false),
        Field::new("agent_id",   DataType::UInt32, false),
        Field::new("kind",       DataType::Utf8,   false),
        Field::new("detail",     DataType::UInt32, false),
        Field::new("sub_detail", DataType::UInt32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",       DataType::UInt64,  false),
        Field::new("time_secs",  DataType::Float64, false),
        Field::new("active",     DataType::UInt64,  false),
        Field::new("retired",    DataType::UInt64,  false),
        Field::new("events",     DataType::UInt64,  false),
        Field::new("no_target",  DataType::UInt64,  false),
        Field::new("mean_speed", DataType::Float32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes simulation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    trajectories: Option<ArrowWriter<File>>,
    events:       Option<ArrowWriter<File>>,
    summaries:    Option<ArrowWriter<File>>,
    traj_schema:  Arc<Schema>,
    event_schema: Arc<Schema>,
    summ_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let traj_schema = trajectory_schema();
        let event_schema = event_schema();
        let summ_schema = summary_schema();

        Ok(Self {
            trajectories: Some(open(dir, "trajectories.parquet", &traj_schema)?),
            events:       Some(open(dir, "events.parquet", &event_schema)?),
            summaries:    Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            traj_schema,
            event_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.trajectories.as_mut() else {
            return Ok(());
        };

        let mut ticks     = UInt64Builder::new();
        let mut times     = Float64Builder::new();
        let mut agent_ids = UInt32Builder::new();
        let mut xs        = Float32Builder::new();
        let mut ys        = Float32Builder::new();
        let mut vxs       = Float32Builder::new();
        let mut vys       = Float32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            times.append_value(row.time_secs);
            agent_ids.append_value(row.agent_id);
            xs.append_value(row.x);
            ys.append_value(row.y);
            vxs.append_value(row.vx);
            vys.append_value(row.vy);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.traj_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(vxs.finish()),
                Arc::new(vys.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.events.as_mut() else {
            return Ok(());
        };

        let mut ticks     = UInt64Builder::new();
        let mut agent_ids = UInt32Builder::new();
        let mut kinds     = StringBuilder::new();
        let mut details   = UInt32Builder::new();
        let mut subs      = UInt32Builder::new();

        for row in rows {
            ticks.append_value(row.tick);
            agent_ids.append_value(row.agent_id);
            kinds.append_value(row.kind);
            details.append_value(row.detail);
            subs.append_value(row.sub_detail);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(kinds.finish()),
                Arc::new(details.finish()),
                Arc::new(subs.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks     = UInt64Builder::new();
        let mut times     = Float64Builder::new();
        let mut active    = UInt64Builder::new();
        let mut retired   = UInt64Builder::new();
        let mut events    = UInt64Builder::new();
        let mut no_target = UInt64Builder::new();
        let mut speeds    = Float32Builder::new();

        ticks.append_value(row.tick);
        times.append_value(row.time_secs);
        active.append_value(row.active);
        retired.append_value(row.retired);
        events.append_value(row.events);
        no_target.append_value(row.no_target);
        speeds.append_value(row.mean_speed);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(active.finish()),
                Arc::new(retired.finish()),
                Arc::new(events.finish()),
                Arc::new(no_target.finish()),
                Arc::new(speeds.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.trajectories.take() {
            w.close()?;
        }
        if let Some(w) = self.events.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
