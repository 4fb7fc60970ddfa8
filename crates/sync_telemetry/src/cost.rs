//! Token-based cost estimation.
//!
//! Producers normally report `cost_usd` themselves; this model fills the
//! gap when a record arrives without one (older orchestrator builds, seed
//! fixtures).

use serde::{Deserialize, Serialize};

/// Per-1k-token USD rates for estimating invocation cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub price_per_1k_in: f64,
    pub price_per_1k_out: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            price_per_1k_in: 0.005,
            price_per_1k_out: 0.015,
        }
    }
}

impl CostModel {
    pub fn new(price_per_1k_in: f64, price_per_1k_out: f64) -> Self {
        Self {
            price_per_1k_in,
            price_per_1k_out,
        }
    }

    /// Estimated USD cost for a call with the given token counts.
    pub fn estimate(&self, tokens_in: u64, tokens_out: u64) -> f64 {
        (tokens_in as f64 / 1000.0) * self.price_per_1k_in
            + (tokens_out as f64 / 1000.0) * self.price_per_1k_out
    }
}
