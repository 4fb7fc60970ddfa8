//! Snapshot types serialized for the dashboard.

use serde::{Deserialize, Serialize};

use sync_telemetry::RunSummary;

/// What the metrics view polls for: window totals plus the most recent
/// runs (at most [`MAX_SNAPSHOT_RUNS`](crate::MAX_SNAPSHOT_RUNS)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_cost_usd: f64,
    pub total_tokens: u64,
    pub avg_latency_ms: f64,
    pub runs: Vec<RunSummary>,
}
