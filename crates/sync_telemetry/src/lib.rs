//! # sync_telemetry
//!
//! Agent invocation telemetry for SupplierSync: the append-only record of
//! every agent call made during an orchestration run, and the aggregation
//! that turns those records into run-level and agent-level metrics.
//!
//! This crate owns two things:
//! - **InvocationStore**: a durable, append-only log of `InvocationRecord`s.
//!   Records are never updated or deleted; cost history must not be
//!   rewritten after the fact.
//! - **aggregate()**: a pure fold over a slice of records producing
//!   `AggregateTotals`, per-run `RunSummary` values, and per-agent
//!   `AgentPerformance` values. No I/O, no shared state, safe to call from
//!   any number of reporting requests concurrently.
//!
//! # Example
//!
//! ```rust
//! use sync_telemetry::{aggregate, InvocationRecord, InvocationStore};
//!
//! let store = InvocationStore::new();
//! store.append(
//!     InvocationRecord::new("supplier", "parse_feed")
//!         .with_run_id("run-1")
//!         .with_tokens(1200, 300)
//!         .with_latency_ms(840.0)
//!         .with_cost_usd(0.0105),
//! ).unwrap();
//!
//! let metrics = aggregate(&store.query_recent(100));
//! assert_eq!(metrics.runs.len(), 1);
//! assert_eq!(metrics.totals.total_tokens, 1500);
//! ```

pub mod aggregate;
pub mod cost;
pub mod error;
pub mod record;
pub mod store;

pub use aggregate::{aggregate, AgentPerformance, AggregateTotals, MetricsAggregate, RunSummary};
pub use cost::CostModel;
pub use error::{TelemetryError, TelemetryResult};
pub use record::{InvocationRecord, RecordId};
pub use store::InvocationStore;
