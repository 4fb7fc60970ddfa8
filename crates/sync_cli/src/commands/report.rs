//! Report command - Aggregate a telemetry export.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use tracing::{info, warn};

use sync_governance::GovernanceLog;
use sync_reporting::ReportingService;
use sync_telemetry::{CostModel, InvocationRecord, InvocationStore};

use crate::ExitCodes;

#[derive(Args)]
pub struct ReportArgs {
    /// JSONL file with one InvocationRecord object per line
    #[arg(long)]
    records: PathBuf,

    /// How many recent records feed the aggregation window
    #[arg(long, default_value_t = 500)]
    limit: usize,
}

pub fn execute(args: ReportArgs) -> Result<u8> {
    let file = File::open(&args.records)
        .with_context(|| format!("records file not found: {}", args.records.display()))?;

    let store = Arc::new(InvocationStore::new());
    let model = CostModel::default();
    let mut skipped = 0usize;

    for (line_number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut record: InvocationRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_number + 1, "skipping unparsable record: {e}");
                skipped += 1;
                continue;
            }
        };
        // Fill in costs older orchestrator builds did not report.
        if record.cost_usd == 0.0 && record.total_tokens() > 0 {
            record.cost_usd = model.estimate(record.tokens_in, record.tokens_out);
        }

        if let Err(e) = store.append(record) {
            warn!(line = line_number + 1, "skipping invalid record: {e}");
            skipped += 1;
        }
    }

    info!(
        ingested = store.len(),
        skipped, "telemetry export ingested"
    );

    let service = ReportingService::new(Arc::clone(&store), Arc::new(GovernanceLog::new()))
        .with_record_window(args.limit);
    let output = json!({
        "metrics": service.metrics_snapshot(),
        "agents": service.agent_performance(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(ExitCodes::SUCCESS)
}
