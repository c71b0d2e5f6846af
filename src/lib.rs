pub mod config;
pub mod error;
pub mod report;
pub mod rows;
pub mod runner;
pub mod workloads;

pub use config::{BenchConfig, DbLocation};
pub use error::{Error, Result};
pub use report::OutputFormat;
pub use runner::{WorkloadKind, WorkloadOutcome, WorkloadResult};
