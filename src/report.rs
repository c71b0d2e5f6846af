//! Result rendering: the console table plus CSV and JSON alternatives.

use std::fmt;
use std::str::FromStr;

use serde_json::json;

use crate::error::Error;
use crate::runner::{WorkloadKind, WorkloadOutcome};

const DASHES: &str = "----------------------------------------";

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!(
                "unknown output format '{other}' (expected table, csv, or json)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Render the collected outcomes in the requested format.
pub fn render(outcomes: &[WorkloadOutcome], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format_table_output(outcomes),
        OutputFormat::Csv => format_csv_output(outcomes),
        OutputFormat::Json => format_json_output(outcomes),
    }
}

fn kind_label(kind: WorkloadKind) -> &'static str {
    match kind {
        WorkloadKind::Insert => "insert",
        WorkloadKind::Update => "update",
    }
}

fn format_table_output(outcomes: &[WorkloadOutcome]) -> String {
    let mut output = String::new();

    table_section(&mut output, "TESTING INSERTS", outcomes, WorkloadKind::Insert);
    output.push('\n');
    table_section(&mut output, "TESTING UPDATES", outcomes, WorkloadKind::Update);

    output
}

fn table_section(
    output: &mut String,
    title: &str,
    outcomes: &[WorkloadOutcome],
    kind: WorkloadKind,
) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&format!(
        "{:<30} {:<15} {:<15}\n",
        "Test", "Time (sec)", "Rows/sec"
    ));
    output.push_str(&format!(
        "{:.30} {:.15} {:.15}\n",
        DASHES, DASHES, DASHES
    ));

    for outcome in outcomes.iter().filter(|o| o.kind() == kind) {
        match outcome {
            WorkloadOutcome::Completed(result) => {
                output.push_str(&format!(
                    "{:<30} {:>15.2} {:>15.2}\n",
                    result.name,
                    result.elapsed.as_secs_f64(),
                    result.rows_per_sec()
                ));
            }
            WorkloadOutcome::Skipped { name, .. } => {
                output.push_str(&format!("{name:<30} {:>15} {:>15}\n", "omitted", "omitted"));
            }
        }
    }
}

fn format_csv_output(outcomes: &[WorkloadOutcome]) -> String {
    let mut output = String::from("test,kind,status,time_sec,rows_per_sec\n");

    for outcome in outcomes {
        match outcome {
            WorkloadOutcome::Completed(result) => {
                output.push_str(&format!(
                    "{},{},completed,{:.6},{:.2}\n",
                    escape_csv_field(result.name),
                    kind_label(result.kind),
                    result.elapsed.as_secs_f64(),
                    result.rows_per_sec()
                ));
            }
            WorkloadOutcome::Skipped { name, kind, .. } => {
                output.push_str(&format!(
                    "{},{},omitted,,\n",
                    escape_csv_field(name),
                    kind_label(*kind)
                ));
            }
        }
    }

    output
}

fn format_json_output(outcomes: &[WorkloadOutcome]) -> String {
    let entries: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| match outcome {
            WorkloadOutcome::Completed(result) => json!({
                "test": result.name,
                "kind": kind_label(result.kind),
                "status": "completed",
                "rows": result.rows,
                "time_sec": result.elapsed.as_secs_f64(),
                "rows_per_sec": result.rows_per_sec(),
            }),
            WorkloadOutcome::Skipped { name, kind, reason } => json!({
                "test": name,
                "kind": kind_label(*kind),
                "status": "omitted",
                "reason": reason,
            }),
        })
        .collect();

    format!("{:#}", serde_json::Value::Array(entries))
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
