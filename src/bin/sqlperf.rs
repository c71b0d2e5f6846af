use std::path::PathBuf;
use std::process;

use clap::Parser;

use sqlperf::config::{BenchConfig, DbLocation, DEFAULT_DB_PATH, DEFAULT_ROWS_STR};
use sqlperf::report::{self, OutputFormat};
use sqlperf::runner;

#[derive(Parser)]
#[command(name = "sqlperf")]
#[command(about = "Benchmarks INSERT and UPDATE strategies against SQLite")]
#[command(version)]
struct Cli {
    /// Number of rows per workload
    #[arg(short, long, default_value = DEFAULT_ROWS_STR)]
    rows: u64,

    /// Database file path
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Use an in-memory database instead of a file
    #[arg(short, long)]
    memory: bool,

    /// Journal mode pragma applied before each workload
    /// (delete, truncate, persist, memory, wal, off)
    #[arg(short, long, value_name = "MODE")]
    journal_mode: Option<String>,

    /// RNG seed for reproducible synthetic data
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also run the unprepared no-transaction insert (slow)
    #[arg(short, long)]
    unprepared: bool,

    /// Output format (table, csv, json)
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Keep the database file after the run
    #[arg(short, long)]
    keep_db: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> sqlperf::Result<()> {
    let format: OutputFormat = cli.format.parse()?;

    let config = BenchConfig {
        rows: cli.rows,
        location: if cli.memory {
            DbLocation::Memory
        } else {
            DbLocation::File(cli.db)
        },
        journal_mode: cli.journal_mode,
        seed: cli.seed,
        unprepared: cli.unprepared,
        format,
        keep_db: cli.keep_db,
    };
    config.validate()?;

    if config.format == OutputFormat::Table {
        println!("SQLite Performance Demo");
        println!("Testing with {} rows.\n", config.rows);
    }

    let outcomes = runner::run_all(&config)?;
    print!("{}", report::render(&outcomes, config.format));

    if config.format == OutputFormat::Table {
        println!("\nTests completed.");
    }

    Ok(())
}
