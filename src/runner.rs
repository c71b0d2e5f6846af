//! Workload scheduling and timing.
//!
//! Each workload runs against a freshly created database: any existing file
//! (plus WAL side files) is deleted first so file growth from an earlier
//! workload cannot skew the next measurement. Setup (schema creation and,
//! for the update workloads, seeding) happens outside the timed section.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::config::{BenchConfig, DbLocation};
use crate::error::Result;
use crate::workloads;

/// Whether a workload measures inserts or updates; drives report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Insert,
    Update,
}

/// A named benchmark workload.
pub struct Workload {
    pub name: &'static str,
    pub kind: WorkloadKind,
    /// Populate the table before timing starts (update workloads)
    seed_rows: bool,
    /// Run only when explicitly enabled (the unprepared insert)
    opt_in: bool,
    run: fn(&mut Connection, &BenchConfig) -> Result<u64>,
}

impl Workload {
    /// The fixed benchmark sequence, in execution order.
    pub fn all() -> Vec<Workload> {
        vec![
            Workload {
                name: "Insert Rows (no xact)",
                kind: WorkloadKind::Insert,
                seed_rows: false,
                opt_in: true,
                run: workloads::insert_unprepared,
            },
            Workload {
                name: "Insert Rows (xact)",
                kind: WorkloadKind::Insert,
                seed_rows: false,
                opt_in: false,
                run: workloads::insert_txn,
            },
            Workload {
                name: "Insert Rows (xact, prep)",
                kind: WorkloadKind::Insert,
                seed_rows: false,
                opt_in: false,
                run: workloads::insert_txn_prepared,
            },
            Workload {
                name: "Update Rows PK",
                kind: WorkloadKind::Update,
                seed_rows: true,
                opt_in: false,
                run: workloads::update_pk,
            },
            Workload {
                name: "Update Rows ROWID",
                kind: WorkloadKind::Update,
                seed_rows: true,
                opt_in: false,
                run: workloads::update_rowid,
            },
        ]
    }
}

/// Timing for one completed workload.
#[derive(Debug, Clone)]
pub struct WorkloadResult {
    pub name: &'static str,
    pub kind: WorkloadKind,
    pub rows: u64,
    pub elapsed: Duration,
}

impl WorkloadResult {
    pub fn rows_per_sec(&self) -> f64 {
        self.rows as f64 / self.elapsed.as_secs_f64()
    }
}

/// Outcome of one scheduled workload.
#[derive(Debug, Clone)]
pub enum WorkloadOutcome {
    Completed(WorkloadResult),
    Skipped {
        name: &'static str,
        kind: WorkloadKind,
        reason: &'static str,
    },
}

impl WorkloadOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            WorkloadOutcome::Completed(result) => result.name,
            WorkloadOutcome::Skipped { name, .. } => name,
        }
    }

    pub fn kind(&self) -> WorkloadKind {
        match self {
            WorkloadOutcome::Completed(result) => result.kind,
            WorkloadOutcome::Skipped { kind, .. } => *kind,
        }
    }
}

/// Run a single workload against a fresh database and time it.
pub fn run_workload(config: &BenchConfig, workload: &Workload) -> Result<WorkloadResult> {
    let mut conn = open_database(config)?;

    if let Some(mode) = &config.journal_mode {
        conn.pragma_update(None, "journal_mode", mode.as_str())?;
    }

    workloads::create_schema(&conn)?;
    if workload.seed_rows {
        workloads::seed_for_updates(&mut conn, config)?;
    }

    let start = Instant::now();
    let rows = (workload.run)(&mut conn, config)?;
    let elapsed = start.elapsed();

    conn.close().map_err(|(_, err)| err)?;

    Ok(WorkloadResult {
        name: workload.name,
        kind: workload.kind,
        rows,
        elapsed,
    })
}

/// Run the full workload sequence and collect the outcomes.
pub fn run_all(config: &BenchConfig) -> Result<Vec<WorkloadOutcome>> {
    let mut outcomes = Vec::new();

    for workload in Workload::all() {
        if workload.opt_in && !config.unprepared {
            outcomes.push(WorkloadOutcome::Skipped {
                name: workload.name,
                kind: workload.kind,
                reason: "slow without a transaction; enable with --unprepared",
            });
            continue;
        }

        outcomes.push(WorkloadOutcome::Completed(run_workload(config, &workload)?));
    }

    if !config.keep_db {
        if let DbLocation::File(path) = &config.location {
            remove_database_files(path)?;
        }
    }

    Ok(outcomes)
}

/// Open a fresh database connection, deleting any file left over from a
/// previous workload first.
fn open_database(config: &BenchConfig) -> Result<Connection> {
    match &config.location {
        DbLocation::Memory => Ok(Connection::open_in_memory()?),
        DbLocation::File(path) => {
            remove_database_files(path)?;
            Ok(Connection::open(path)?)
        }
    }
}

/// Delete the database file and its WAL side files, ignoring files that
/// were never created.
fn remove_database_files(path: &Path) -> Result<()> {
    let side = |suffix: &str| {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        name
    };

    for file in [path.as_os_str().to_os_string(), side("-wal"), side("-shm")] {
        match fs::remove_file(&file) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
