//! CLI command definitions.
//!
//! This module defines the command structure for the SupplierSync CLI.
//! Each subcommand exercises one side of the core: governance review or
//! telemetry reporting.

use clap::{Parser, Subcommand};

pub mod evaluate;
pub mod report;

/// SupplierSync - pricing governance and run metrics tooling
#[derive(Parser)]
#[command(name = "sync")]
#[command(version, about = "SupplierSync - pricing governance and run metrics tooling")]
#[command(long_about = r#"
Operator tooling for the SupplierSync core: classify price proposals the
way the orchestrator's governance step does, and fold telemetry exports
into the metrics snapshot the dashboard shows.

COMMANDS:
  evaluate  → Classify one price proposal against a governance policy
  report    → Ingest an invocation-record JSONL file and print metrics

EXIT CODES:
  0 - Success / proposal accepted
  1 - General error
  2 - Invalid arguments
  3 - Validation failure / proposal rejected
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a price proposal against a governance policy
    Evaluate(evaluate::EvaluateArgs),

    /// Aggregate a telemetry JSONL export into a metrics snapshot
    Report(report::ReportArgs),
}
