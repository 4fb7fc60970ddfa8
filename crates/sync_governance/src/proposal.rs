//! Price change proposals.

use serde::{Deserialize, Serialize};

/// A price change an agent wants to apply, before governance review.
///
/// Only the sku and the proposed price are required; the classifier
/// treats every other field as "unknown" when absent and skips the rules
/// that would need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceProposal {
    pub sku: String,
    pub proposed_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_wholesale_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_retail_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Orchestration run that produced the proposal, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl PriceProposal {
    pub fn new(sku: impl Into<String>, proposed_price: f64) -> Self {
        Self {
            sku: sku.into(),
            proposed_price,
            current_wholesale_price: None,
            current_retail_price: None,
            category: None,
            run_id: None,
        }
    }

    pub fn with_wholesale_price(mut self, price: f64) -> Self {
        self.current_wholesale_price = Some(price);
        self
    }

    pub fn with_retail_price(mut self, price: f64) -> Self {
        self.current_retail_price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }
}
