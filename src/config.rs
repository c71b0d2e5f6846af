use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::report::OutputFormat;

/// Default number of rows each workload writes or rewrites
pub const DEFAULT_ROWS: u64 = 100_000;
/// Stringified default row count (for CLI help text)
pub const DEFAULT_ROWS_STR: &str = "100000";
/// Default database file path
pub const DEFAULT_DB_PATH: &str = "sqlperf.db";

/// Journal modes SQLite accepts for `PRAGMA journal_mode`
pub const JOURNAL_MODES: [&str; 6] = ["delete", "truncate", "persist", "memory", "wal", "off"];

/// Where the benchmark database lives.
///
/// File-backed runs delete and recreate the file before every workload so
/// file growth from an earlier workload cannot skew timings. In-memory runs
/// get a fresh `:memory:` connection per workload instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Config options for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of rows per workload (default: 100 000)
    pub rows: u64,
    /// Database location (default: ./sqlperf.db)
    pub location: DbLocation,
    /// Optional `PRAGMA journal_mode` applied before each workload
    pub journal_mode: Option<String>,
    /// RNG seed for reproducible synthetic data; unseeded when `None`
    pub seed: Option<u64>,
    /// Run the unprepared no-transaction insert. Off by default, it is
    /// orders of magnitude slower than the other strategies.
    pub unprepared: bool,
    /// Report rendering format (default: table)
    pub format: OutputFormat,
    /// Leave the database file behind after the run for inspection
    pub keep_db: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            location: DbLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
            journal_mode: None,
            seed: None,
            unprepared: false,
            format: OutputFormat::Table,
            keep_db: false,
        }
    }
}

impl BenchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(Error::Config("row count must be greater than 0".to_string()));
        }

        if let Some(mode) = &self.journal_mode {
            if !JOURNAL_MODES.contains(&mode.to_lowercase().as_str()) {
                return Err(Error::Config(format!(
                    "unknown journal mode '{}' (expected one of: {})",
                    mode,
                    JOURNAL_MODES.join(", ")
                )));
            }
        }

        Ok(())
    }
}
