//! Governance verdicts and the rejection reason taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a proposal passed governance review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// Fixed taxonomy of rejection reasons.
///
/// The console labels each code separately, so codes are part of the
/// observable contract: one code per rejection, drawn from this list,
/// never invented ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    MissingSku,
    InvalidPriceFormat,
    PriceMustBePositive,
    CategoryNotAllowed,
    CategoryBlocked,
    RetailBelowWholesale,
    MarginBelowMinimum,
    DailyDriftExceeded,
    BelowMapPrice,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MissingSku => "missing_sku",
            ReasonCode::InvalidPriceFormat => "invalid_price_format",
            ReasonCode::PriceMustBePositive => "price_must_be_positive",
            ReasonCode::CategoryNotAllowed => "category_not_allowed",
            ReasonCode::CategoryBlocked => "category_blocked",
            ReasonCode::RetailBelowWholesale => "retail_below_wholesale",
            ReasonCode::MarginBelowMinimum => "margin_below_minimum",
            ReasonCode::DailyDriftExceeded => "daily_drift_exceeded",
            ReasonCode::BelowMapPrice => "below_map_price",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One governance decision for one evaluated proposal.
///
/// Invariant: `reason_code` is `Some` exactly when the outcome is
/// `Rejected`. Verdicts are immutable once recorded in the
/// [`GovernanceLog`](crate::log::GovernanceLog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceVerdict {
    /// Assigned by the log on record; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub sku: String,
    pub proposed_price: f64,
    /// Retail price in effect when the proposal was evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<ReasonCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GovernanceVerdict {
    /// An accepted verdict carries no reason code.
    pub fn accepted(sku: impl Into<String>, proposed_price: f64) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            proposed_price,
            current_price: None,
            outcome: Outcome::Accepted,
            reason_code: None,
            reason_details: None,
            run_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn rejected(sku: impl Into<String>, proposed_price: f64, reason: ReasonCode) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            proposed_price,
            current_price: None,
            outcome: Outcome::Rejected,
            reason_code: Some(reason),
            reason_details: None,
            run_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_current_price(mut self, price: Option<f64>) -> Self {
        self.current_price = price;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.reason_details = Some(details.into());
        self
    }

    pub fn with_run_id(mut self, run_id: Option<String>) -> Self {
        self.run_id = run_id;
        self
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome == Outcome::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_serialize_snake_case() {
        let json = serde_json::to_string(&ReasonCode::RetailBelowWholesale).unwrap();
        assert_eq!(json, "\"retail_below_wholesale\"");
        assert_eq!(ReasonCode::BelowMapPrice.as_str(), "below_map_price");
    }

    #[test]
    fn test_accepted_has_no_reason() {
        let verdict = GovernanceVerdict::accepted("WF-001", 12.0);
        assert_eq!(verdict.outcome, Outcome::Accepted);
        assert!(verdict.reason_code.is_none());
        assert!(!verdict.is_rejected());
    }

    #[test]
    fn test_rejected_carries_reason() {
        let verdict =
            GovernanceVerdict::rejected("WF-001", 12.0, ReasonCode::MarginBelowMinimum)
                .with_details("Margin 2.0% is below minimum 5%");
        assert!(verdict.is_rejected());
        assert_eq!(verdict.reason_code, Some(ReasonCode::MarginBelowMinimum));
        assert!(verdict.reason_details.is_some());
    }
}
