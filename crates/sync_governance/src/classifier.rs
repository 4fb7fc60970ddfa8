//! Ordered rule evaluation for price proposals.

use tracing::debug;

use crate::policy::GovernancePolicy;
use crate::proposal::PriceProposal;
use crate::verdict::{GovernanceVerdict, ReasonCode};

/// Applies the governance rule set to one proposal at a time.
///
/// Rules run in a fixed priority order and the FIRST failing rule decides
/// the reason code; later rules are not evaluated. A proposal therefore
/// gets exactly one explanatory reason, and the evaluation order is part
/// of the observable contract:
///
/// 1. sku present
/// 2. price is a finite, positive number
/// 3. category allowlist, then blocklist
/// 4. retail not below wholesale
/// 5. margin at or above the minimum
/// 6. same-day drift within the limit
/// 7. at or above the MAP floor
///
/// Malformed input never raises an error: a missing sku or an unparsable
/// price is itself a classifiable rejection, which is why those checks
/// sit first.
pub struct ProposalClassifier;

impl ProposalClassifier {
    /// Evaluate a proposal against a policy. Pure: no clock reads beyond
    /// the verdict timestamp, no shared state, freely concurrent.
    pub fn classify(proposal: &PriceProposal, policy: &GovernancePolicy) -> GovernanceVerdict {
        let verdict = Self::evaluate_rules(proposal, policy);
        match verdict.reason_code {
            Some(code) => debug!(sku = %verdict.sku, reason = %code, "proposal rejected"),
            None => debug!(sku = %verdict.sku, "proposal accepted"),
        }
        verdict
    }

    fn evaluate_rules(proposal: &PriceProposal, policy: &GovernancePolicy) -> GovernanceVerdict {
        let price = proposal.proposed_price;
        let reject = |reason: ReasonCode, details: String| {
            GovernanceVerdict::rejected(&proposal.sku, price, reason)
                .with_details(details)
                .with_current_price(proposal.current_retail_price)
                .with_run_id(proposal.run_id.clone())
        };

        // Rule 1: sku must be present.
        if proposal.sku.trim().is_empty() {
            return reject(
                ReasonCode::MissingSku,
                "Proposal has no sku".to_string(),
            );
        }

        // Rule 2: price must be a finite, positive number.
        if !price.is_finite() {
            return reject(
                ReasonCode::InvalidPriceFormat,
                format!("Could not interpret price: {price}"),
            );
        }
        if price <= 0.0 {
            return reject(
                ReasonCode::PriceMustBePositive,
                format!("Price must be greater than 0, got {price}"),
            );
        }

        // Rule 3: category allowlist, then blocklist. Both terminal.
        if let Some(category) = proposal.category.as_deref() {
            if let Some(allowed) = &policy.allowed_categories {
                if !allowed.contains(category) {
                    return reject(
                        ReasonCode::CategoryNotAllowed,
                        format!("Category '{category}' is not in the allowed list"),
                    );
                }
            }
            if policy.blocked_categories.contains(category) {
                return reject(
                    ReasonCode::CategoryBlocked,
                    format!("Category '{category}' is blocked"),
                );
            }
        }

        if let Some(wholesale) = proposal.current_wholesale_price {
            // Rule 4: retail must not be below wholesale.
            if price < wholesale {
                return reject(
                    ReasonCode::RetailBelowWholesale,
                    format!(
                        "Retail price ${price:.2} cannot be below wholesale ${wholesale:.2}"
                    ),
                );
            }

            // Rule 5: margin, relative to the retail price.
            let margin = (price - wholesale) / price;
            if margin < policy.min_margin_fraction {
                return reject(
                    ReasonCode::MarginBelowMinimum,
                    format!(
                        "Margin {:.1}% is below minimum {:.0}%",
                        margin * 100.0,
                        policy.min_margin_fraction * 100.0
                    ),
                );
            }
        }

        // Rule 6: daily drift against the current retail price.
        if let Some(current) = proposal.current_retail_price {
            if current > 0.0 {
                let drift = (price - current).abs() / current;
                if drift > policy.max_daily_drift_fraction {
                    return reject(
                        ReasonCode::DailyDriftExceeded,
                        format!(
                            "Price change {:.1}% exceeds daily limit {:.0}% (${current:.2} -> ${price:.2})",
                            drift * 100.0,
                            policy.max_daily_drift_fraction * 100.0
                        ),
                    );
                }
            }
        }

        // Rule 7: MAP floor for this sku, when configured.
        if let Some(&floor) = policy.map_prices.get(&proposal.sku) {
            if price < floor {
                return reject(
                    ReasonCode::BelowMapPrice,
                    format!("Price ${price:.2} is below MAP ${floor:.2}"),
                );
            }
        }

        GovernanceVerdict::accepted(&proposal.sku, price)
            .with_current_price(proposal.current_retail_price)
            .with_run_id(proposal.run_id.clone())
    }
}
