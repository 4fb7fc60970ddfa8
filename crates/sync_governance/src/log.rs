//! Append-only log of governance verdicts.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::ProposalClassifier;
use crate::policy::GovernancePolicy;
use crate::proposal::PriceProposal;
use crate::verdict::{GovernanceVerdict, Outcome};

/// Accepted/rejected totals for the console's stats cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GovernanceCounts {
    pub accepted: u64,
    pub rejected: u64,
}

struct LogInner {
    next_id: u64,
    verdicts: Vec<GovernanceVerdict>,
}

/// Audit trail of every governance decision.
///
/// Every evaluated proposal lands here, accepted or rejected: accepted
/// proposals are not silently dropped, so downstream reporting can count
/// both outcomes from the same log. Verdicts are immutable once recorded;
/// ids are assigned under the write lock, giving appends a total order.
pub struct GovernanceLog {
    inner: RwLock<LogInner>,
}

impl GovernanceLog {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LogInner {
                next_id: 1,
                verdicts: Vec::new(),
            }),
        }
    }

    /// Append a verdict, assigning its id. Returns the stored copy.
    pub fn record(&self, mut verdict: GovernanceVerdict) -> GovernanceVerdict {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        verdict.id = Some(id);
        debug!(verdict_id = id, sku = %verdict.sku, outcome = ?verdict.outcome, "verdict recorded");
        inner.verdicts.push(verdict.clone());
        verdict
    }

    /// Classify a proposal and record the verdict in one step.
    pub fn evaluate(
        &self,
        proposal: &PriceProposal,
        policy: &GovernancePolicy,
    ) -> GovernanceVerdict {
        self.record(ProposalClassifier::classify(proposal, policy))
    }

    /// The console's "governance decisions" view: rejected verdicts only,
    /// most recent first by id.
    pub fn query_recent(&self, limit: usize) -> Vec<GovernanceVerdict> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .verdicts
            .iter()
            .rev()
            .filter(|v| v.outcome == Outcome::Rejected)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Both outcomes, most recent first, for audit and metrics needs.
    pub fn query_all(&self, limit: usize) -> Vec<GovernanceVerdict> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.verdicts.iter().rev().take(limit).cloned().collect()
    }

    pub fn counts(&self) -> GovernanceCounts {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut counts = GovernanceCounts::default();
        for verdict in &inner.verdicts {
            match verdict.outcome {
                Outcome::Accepted => counts.accepted += 1,
                Outcome::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .verdicts
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GovernanceLog {
    fn default() -> Self {
        Self::new()
    }
}
