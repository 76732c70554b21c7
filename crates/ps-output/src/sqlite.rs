//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `trajectories`, `events`, and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, TrajectoryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS trajectories (
                 tick      INTEGER NOT NULL,
                 time_secs REAL    NOT NULL,
                 agent_id  INTEGER NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL,
                 vx        REAL    NOT NULL,
                 vy        REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS events (
                 tick       INTEGER NOT NULL,
                 agent_id   INTEGER NOT NULL,
                 kind       TEXT    NOT NULL,
                 detail     INTEGER NOT NULL,
                 sub_detail INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick       INTEGER PRIMARY KEY,
                 time_secs  REAL    NOT NULL,
                 active     INTEGER NOT NULL,
                 retired    INTEGER NOT NULL,
                 events     INTEGER NOT NULL,
                 no_target  INTEGER NOT NULL,
                 mean_speed REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trajectories (tick, time_secs, agent_id, x, y, vx, vy) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.time_secs,
                    row.agent_id,
                    row.x as f64,
                    row.y as f64,
                    row.vx as f64,
                    row.vy as f64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (tick, agent_id, kind, detail, sub_detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.agent_id,
                    row.kind,
                    row.detail,
                    row.sub_detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, time_secs, active, retired, events, no_target, mean_speed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick,
                row.time_secs,
                row.active,
                row.retired,
                row.events,
                row.no_target,
                row.mean_speed as f64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
