//! Invocation records: one row per agent call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TelemetryError, TelemetryResult};

/// Store-assigned record identifier, monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Telemetry for a single agent invocation.
///
/// Produced by the orchestrator when an agent call completes, appended to
/// the [`InvocationStore`](crate::store::InvocationStore), and never
/// modified afterwards. An empty `run_id` means the call happened outside
/// an orchestration run; such records still count towards global totals but
/// are excluded from per-run grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Assigned by the store on append; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Agent that made the call ("supplier", "buyer", "cx", ...).
    pub agent_name: String,
    /// Free-form step label within the agent's work.
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub tokens_in: u64,
    #[serde(default)]
    pub tokens_out: u64,
    #[serde(default)]
    pub latency_ms: f64,
    #[serde(default)]
    pub cost_usd: f64,
    /// Orchestration run this call belongs to; empty when none.
    #[serde(default)]
    pub run_id: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl InvocationRecord {
    /// Create a record with required fields, defaulting the counters.
    pub fn new(agent_name: impl Into<String>, step: impl Into<String>) -> Self {
        Self {
            id: None,
            agent_name: agent_name.into(),
            step: step.into(),
            tokens_in: 0,
            tokens_out: 0,
            latency_ms: 0.0,
            cost_usd: 0.0,
            run_id: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn with_tokens(mut self, tokens_in: u64, tokens_out: u64) -> Self {
        self.tokens_in = tokens_in;
        self.tokens_out = tokens_out;
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: f64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_cost_usd(mut self, cost_usd: f64) -> Self {
        self.cost_usd = cost_usd;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Total tokens consumed and produced by this call.
    pub fn total_tokens(&self) -> u64 {
        self.tokens_in + self.tokens_out
    }

    /// Check the append invariants: non-empty agent name, finite
    /// non-negative latency and cost.
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.agent_name.trim().is_empty() {
            return Err(TelemetryError::Validation(
                "agent_name must not be empty".to_string(),
            ));
        }
        if !self.latency_ms.is_finite() || self.latency_ms < 0.0 {
            return Err(TelemetryError::Validation(format!(
                "latency_ms must be a non-negative number, got {}",
                self.latency_ms
            )));
        }
        if !self.cost_usd.is_finite() || self.cost_usd < 0.0 {
            return Err(TelemetryError::Validation(format!(
                "cost_usd must be a non-negative number, got {}",
                self.cost_usd
            )));
        }
        Ok(())
    }
}
