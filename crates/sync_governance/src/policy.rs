//! Governance policy configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GovernanceError, GovernanceResult};

/// Thresholds and lists the classifier evaluates proposals against.
///
/// Policy is supplied by the caller; the classifier applies it but never
/// decides it. Defaults match the production configuration: 5% minimum
/// margin, 20% maximum daily drift, no category restrictions, no MAP
/// floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernancePolicy {
    /// Minimum acceptable margin, as a fraction of the retail price.
    pub min_margin_fraction: f64,
    /// Maximum acceptable same-day price movement, as a fraction of the
    /// current retail price.
    pub max_daily_drift_fraction: f64,
    /// Categories that may never receive agent-driven price changes.
    pub blocked_categories: BTreeSet<String>,
    /// When set, only these categories may receive price changes.
    pub allowed_categories: Option<BTreeSet<String>>,
    /// Manufacturer-advertised price floors by sku.
    pub map_prices: BTreeMap<String, f64>,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            min_margin_fraction: 0.05,
            max_daily_drift_fraction: 0.20,
            blocked_categories: BTreeSet::new(),
            allowed_categories: None,
            map_prices: BTreeMap::new(),
        }
    }
}

impl GovernancePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a policy from a YAML file. Missing keys fall back to defaults.
    pub fn from_yaml_file(path: &Path) -> GovernanceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let policy: Self = serde_yaml::from_str(&content)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_min_margin(mut self, fraction: f64) -> Self {
        self.min_margin_fraction = fraction;
        self
    }

    pub fn with_max_daily_drift(mut self, fraction: f64) -> Self {
        self.max_daily_drift_fraction = fraction;
        self
    }

    pub fn with_blocked_category(mut self, category: impl Into<String>) -> Self {
        self.blocked_categories.insert(category.into());
        self
    }

    /// Restrict price changes to an explicit allowlist of categories.
    pub fn with_allowed_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_map_price(mut self, sku: impl Into<String>, floor: f64) -> Self {
        self.map_prices.insert(sku.into(), floor);
        self
    }

    /// Check that fractions are sane before use.
    pub fn validate(&self) -> GovernanceResult<()> {
        if !(0.0..=1.0).contains(&self.min_margin_fraction) {
            return Err(GovernanceError::InvalidPolicy(format!(
                "min_margin_fraction must be within [0, 1], got {}",
                self.min_margin_fraction
            )));
        }
        if !self.max_daily_drift_fraction.is_finite() || self.max_daily_drift_fraction < 0.0 {
            return Err(GovernanceError::InvalidPolicy(format!(
                "max_daily_drift_fraction must be non-negative, got {}",
                self.max_daily_drift_fraction
            )));
        }
        Ok(())
    }
}
