//! Run and agent metrics derived from invocation records.
//!
//! [`aggregate`] is a pure fold over an in-memory slice: storage decides
//! which records to consider (typically the most recent N), this module
//! only sums and groups them. Feeding the same slice twice produces
//! bit-identical output, which keeps the dashboard's poll-refresh stable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::InvocationRecord;

/// Totals over every considered record, with or without a run id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub total_cost_usd: f64,
    /// Input plus output tokens.
    pub total_tokens: u64,
    /// Mean latency across records; 0 when there are no records.
    pub avg_latency_ms: f64,
    pub record_count: u64,
}

/// Metrics for one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub total_cost_usd: f64,
    pub total_tokens_in: u64,
    pub total_tokens_out: u64,
    pub total_latency_ms: f64,
    /// Number of invocation records in the run. An agent invoked twice
    /// counts twice; this is not a distinct-agent count.
    pub record_count: u64,
    /// Timestamp of the earliest record observed for the run; orders the
    /// "recent runs" table.
    pub created_at: DateTime<Utc>,
}

/// Metrics for one agent across every run in the considered window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub agent_name: String,
    pub call_count: u64,
    pub avg_latency_ms: f64,
    pub total_cost_usd: f64,
    pub avg_cost_usd: f64,
    pub total_tokens_in: u64,
    pub total_tokens_out: u64,
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsAggregate {
    pub totals: AggregateTotals,
    /// One summary per distinct run, most recent first.
    pub runs: Vec<RunSummary>,
    /// One entry per distinct agent, sorted by name.
    pub agents: Vec<AgentPerformance>,
}

#[derive(Default)]
struct RunAccum {
    total_cost_usd: f64,
    total_tokens_in: u64,
    total_tokens_out: u64,
    total_latency_ms: f64,
    record_count: u64,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct AgentAccum {
    call_count: u64,
    total_latency_ms: f64,
    total_cost_usd: f64,
    total_tokens_in: u64,
    total_tokens_out: u64,
}

/// Fold invocation records into totals, per-run summaries, and per-agent
/// performance.
///
/// Records with an empty `run_id` contribute to totals and agent metrics
/// but produce no `RunSummary`. An empty input yields all-zero totals and
/// empty sequences, never an error: "no data yet" is an expected state.
pub fn aggregate(records: &[InvocationRecord]) -> MetricsAggregate {
    let mut total_cost = 0.0;
    let mut total_tokens = 0u64;
    let mut total_latency = 0.0;

    let mut runs: BTreeMap<&str, RunAccum> = BTreeMap::new();
    let mut agents: BTreeMap<&str, AgentAccum> = BTreeMap::new();

    for record in records {
        total_cost += record.cost_usd;
        total_tokens += record.total_tokens();
        total_latency += record.latency_ms;

        if !record.run_id.is_empty() {
            let run = runs.entry(record.run_id.as_str()).or_default();
            run.total_cost_usd += record.cost_usd;
            run.total_tokens_in += record.tokens_in;
            run.total_tokens_out += record.tokens_out;
            run.total_latency_ms += record.latency_ms;
            run.record_count += 1;
            run.created_at = Some(match run.created_at {
                Some(existing) => existing.min(record.created_at),
                None => record.created_at,
            });
        }

        let agent = agents.entry(record.agent_name.as_str()).or_default();
        agent.call_count += 1;
        agent.total_latency_ms += record.latency_ms;
        agent.total_cost_usd += record.cost_usd;
        agent.total_tokens_in += record.tokens_in;
        agent.total_tokens_out += record.tokens_out;
    }

    let record_count = records.len() as u64;
    let totals = AggregateTotals {
        total_cost_usd: total_cost,
        total_tokens,
        avg_latency_ms: if record_count > 0 {
            total_latency / record_count as f64
        } else {
            0.0
        },
        record_count,
    };

    let mut runs: Vec<RunSummary> = runs
        .into_iter()
        .map(|(run_id, accum)| RunSummary {
            run_id: run_id.to_string(),
            total_cost_usd: accum.total_cost_usd,
            total_tokens_in: accum.total_tokens_in,
            total_tokens_out: accum.total_tokens_out,
            total_latency_ms: accum.total_latency_ms,
            record_count: accum.record_count,
            // Safe: an accumulator only exists after at least one record.
            created_at: accum.created_at.unwrap_or_default(),
        })
        .collect();
    // Most recent run first; equal timestamps fall back to run_id order,
    // which the BTreeMap already established.
    runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let agents = agents
        .into_iter()
        .map(|(agent_name, accum)| AgentPerformance {
            agent_name: agent_name.to_string(),
            call_count: accum.call_count,
            avg_latency_ms: accum.total_latency_ms / accum.call_count as f64,
            total_cost_usd: accum.total_cost_usd,
            avg_cost_usd: accum.total_cost_usd / accum.call_count as f64,
            total_tokens_in: accum.total_tokens_in,
            total_tokens_out: accum.total_tokens_out,
        })
        .collect();

    MetricsAggregate {
        totals,
        runs,
        agents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InvocationRecord;
    use chrono::Duration;

    fn record(
        agent: &str,
        run: &str,
        cost: f64,
        tokens: (u64, u64),
        latency: f64,
    ) -> InvocationRecord {
        InvocationRecord::new(agent, "step")
            .with_run_id(run)
            .with_cost_usd(cost)
            .with_tokens(tokens.0, tokens.1)
            .with_latency_ms(latency)
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let metrics = aggregate(&[]);
        assert_eq!(metrics.totals, AggregateTotals::default());
        assert!(metrics.runs.is_empty());
        assert!(metrics.agents.is_empty());
    }

    #[test]
    fn test_run_grouping_sums_costs() {
        let records = vec![
            record("supplier", "r1", 0.01, (100, 50), 10.0),
            record("buyer", "r1", 0.02, (200, 80), 20.0),
            record("cx", "r1", 0.03, (50, 20), 30.0),
        ];
        let metrics = aggregate(&records);

        assert_eq!(metrics.runs.len(), 1);
        let run = &metrics.runs[0];
        assert_eq!(run.run_id, "r1");
        assert!((run.total_cost_usd - 0.06).abs() < 1e-12);
        assert_eq!(run.record_count, 3);
        assert_eq!(run.total_tokens_in, 350);
        assert_eq!(run.total_tokens_out, 150);
    }

    #[test]
    fn test_record_count_counts_records_not_distinct_agents() {
        // The same agent invoked twice in one run counts twice.
        let records = vec![
            record("supplier", "r1", 0.01, (0, 0), 0.0),
            record("supplier", "r1", 0.01, (0, 0), 0.0),
        ];
        let metrics = aggregate(&records);
        assert_eq!(metrics.runs[0].record_count, 2);
        assert_eq!(metrics.agents.len(), 1);
        assert_eq!(metrics.agents[0].call_count, 2);
    }

    #[test]
    fn test_blank_run_id_excluded_from_runs_but_counted_in_totals() {
        let records = vec![
            record("supplier", "r1", 0.10, (100, 0), 5.0),
            record("adhoc", "", 0.05, (50, 0), 15.0),
        ];
        let metrics = aggregate(&records);

        assert_eq!(metrics.runs.len(), 1);
        assert!((metrics.totals.total_cost_usd - 0.15).abs() < 1e-12);
        assert_eq!(metrics.totals.total_tokens, 150);
        assert!((metrics.totals.avg_latency_ms - 10.0).abs() < 1e-12);
        // Agent metrics still cover the run-less record.
        assert_eq!(metrics.agents.len(), 2);
    }

    #[test]
    fn test_zero_valued_record_contributes_zero_not_skipped() {
        let records = vec![record("supplier", "r1", 0.0, (0, 0), 0.0)];
        let metrics = aggregate(&records);
        assert_eq!(metrics.runs[0].record_count, 1);
        assert_eq!(metrics.totals.total_cost_usd, 0.0);
        assert_eq!(metrics.agents[0].call_count, 1);
    }

    #[test]
    fn test_runs_sorted_most_recent_first_ties_by_run_id() {
        let base = Utc::now();
        let records = vec![
            record("a", "old", 0.0, (0, 0), 0.0).with_created_at(base - Duration::hours(2)),
            record("a", "zeta", 0.0, (0, 0), 0.0).with_created_at(base),
            record("a", "alpha", 0.0, (0, 0), 0.0).with_created_at(base),
        ];
        let metrics = aggregate(&records);
        let ids: Vec<&str> = metrics.runs.iter().map(|r| r.run_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta", "old"]);
    }

    #[test]
    fn test_run_created_at_is_earliest_record() {
        let base = Utc::now();
        let records = vec![
            record("a", "r1", 0.0, (0, 0), 0.0).with_created_at(base),
            record("b", "r1", 0.0, (0, 0), 0.0).with_created_at(base - Duration::minutes(10)),
        ];
        let metrics = aggregate(&records);
        assert_eq!(metrics.runs[0].created_at, base - Duration::minutes(10));
    }

    #[test]
    fn test_agent_cost_conservation() {
        // Σ per-agent cost equals the global total, run ids or not.
        let records = vec![
            record("supplier", "r1", 0.011, (10, 5), 1.0),
            record("buyer", "r2", 0.027, (20, 9), 2.0),
            record("supplier", "", 0.004, (3, 1), 3.0),
        ];
        let metrics = aggregate(&records);
        let agent_total: f64 = metrics.agents.iter().map(|a| a.total_cost_usd).sum();
        assert!((agent_total - metrics.totals.total_cost_usd).abs() < 1e-12);
    }

    #[test]
    fn test_agent_averages() {
        let records = vec![
            record("supplier", "r1", 0.02, (100, 0), 10.0),
            record("supplier", "r1", 0.04, (200, 0), 30.0),
        ];
        let metrics = aggregate(&records);
        let agent = &metrics.agents[0];
        assert!((agent.avg_latency_ms - 20.0).abs() < 1e-12);
        assert!((agent.avg_cost_usd - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = vec![
            record("supplier", "r1", 0.013, (123, 45), 17.3),
            record("buyer", "r2", 0.021, (67, 89), 41.9),
            record("cx", "r1", 0.002, (5, 5), 3.1),
        ];
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_agents_sorted_by_name() {
        let records = vec![
            record("zeta", "r1", 0.0, (0, 0), 0.0),
            record("alpha", "r1", 0.0, (0, 0), 0.0),
        ];
        let metrics = aggregate(&records);
        let names: Vec<&str> = metrics.agents.iter().map(|a| a.agent_name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
