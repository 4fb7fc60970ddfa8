//! # sync_reporting
//!
//! Read-only reporting facade for the operator console. Composes the
//! telemetry store and the governance log into the snapshots the
//! dashboard polls for; holds no state of its own and caches nothing, so
//! freshness is "as of last call".
//!
//! The facade never writes: the store and log own their rows exclusively,
//! this crate only reads and derives.

pub mod snapshot;

use std::sync::Arc;

use tracing::debug;

use sync_governance::{GovernanceCounts, GovernanceLog, GovernanceVerdict};
use sync_telemetry::{aggregate, AgentPerformance, InvocationStore};

pub use snapshot::MetricsSnapshot;

/// Maximum number of run summaries included in a metrics snapshot.
pub const MAX_SNAPSHOT_RUNS: usize = 20;

/// How many recent invocation records feed aggregation by default.
pub const DEFAULT_RECORD_WINDOW: usize = 500;

/// Query surface the dashboard's API layer reads from.
pub struct ReportingService {
    store: Arc<InvocationStore>,
    log: Arc<GovernanceLog>,
    record_window: usize,
}

impl ReportingService {
    pub fn new(store: Arc<InvocationStore>, log: Arc<GovernanceLog>) -> Self {
        Self {
            store,
            log,
            record_window: DEFAULT_RECORD_WINDOW,
        }
    }

    /// Bound how many recent records each snapshot aggregates over.
    pub fn with_record_window(mut self, window: usize) -> Self {
        self.record_window = window;
        self
    }

    /// Totals plus the most recent runs, for the metrics view.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        let records = self.store.query_recent(self.record_window);
        let metrics = aggregate(&records);
        debug!(
            records = records.len(),
            runs = metrics.runs.len(),
            "metrics snapshot built"
        );

        let mut runs = metrics.runs;
        runs.truncate(MAX_SNAPSHOT_RUNS);
        MetricsSnapshot {
            total_cost_usd: metrics.totals.total_cost_usd,
            total_tokens: metrics.totals.total_tokens,
            avg_latency_ms: metrics.totals.avg_latency_ms,
            runs,
        }
    }

    /// Per-agent metrics over the same record window.
    pub fn agent_performance(&self) -> Vec<AgentPerformance> {
        let records = self.store.query_recent(self.record_window);
        aggregate(&records).agents
    }

    /// Recent rejected verdicts, for the governance decisions table.
    pub fn governance_decisions(&self, limit: usize) -> Vec<GovernanceVerdict> {
        self.log.query_recent(limit)
    }

    /// Accepted/rejected totals, for the stats cards.
    pub fn governance_counts(&self) -> GovernanceCounts {
        self.log.counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_governance::{GovernancePolicy, PriceProposal};
    use sync_telemetry::InvocationRecord;

    fn service() -> (Arc<InvocationStore>, Arc<GovernanceLog>, ReportingService) {
        let store = Arc::new(InvocationStore::new());
        let log = Arc::new(GovernanceLog::new());
        let service = ReportingService::new(Arc::clone(&store), Arc::clone(&log));
        (store, log, service)
    }

    #[test]
    fn test_empty_snapshot_is_zeroed_not_an_error() {
        let (_store, _log, service) = service();
        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.total_cost_usd, 0.0);
        assert_eq!(snapshot.total_tokens, 0);
        assert_eq!(snapshot.avg_latency_ms, 0.0);
        assert!(snapshot.runs.is_empty());
        assert!(service.agent_performance().is_empty());
        assert!(service.governance_decisions(10).is_empty());
    }

    #[test]
    fn test_snapshot_reflects_appended_records() {
        let (store, _log, service) = service();
        for i in 0..3 {
            store
                .append(
                    InvocationRecord::new("supplier", "work")
                        .with_run_id(format!("run-{i}"))
                        .with_tokens(100, 50)
                        .with_cost_usd(0.01),
                )
                .unwrap();
        }

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.runs.len(), 3);
        assert_eq!(snapshot.total_tokens, 450);
        assert!((snapshot.total_cost_usd - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_caps_runs_at_twenty() {
        let (store, _log, service) = service();
        for i in 0..30 {
            store
                .append(
                    InvocationRecord::new("supplier", "work").with_run_id(format!("run-{i:02}")),
                )
                .unwrap();
        }

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.runs.len(), MAX_SNAPSHOT_RUNS);
    }

    #[test]
    fn test_record_window_bounds_aggregation() {
        let (store, _log, service) = service();
        let service = service.with_record_window(2);
        for _ in 0..5 {
            store
                .append(InvocationRecord::new("supplier", "work").with_cost_usd(0.01))
                .unwrap();
        }

        let snapshot = service.metrics_snapshot();
        assert!((snapshot.total_cost_usd - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_governance_views_pass_through() {
        let (_store, log, service) = service();
        let policy = GovernancePolicy::default();
        log.evaluate(&PriceProposal::new("OK", 10.0), &policy);
        log.evaluate(&PriceProposal::new("", 10.0), &policy);

        let decisions = service.governance_decisions(10);
        assert_eq!(decisions.len(), 1);
        assert!(decisions[0].is_rejected());

        let counts = service.governance_counts();
        assert_eq!(counts.accepted, 1);
        assert_eq!(counts.rejected, 1);
    }
}
