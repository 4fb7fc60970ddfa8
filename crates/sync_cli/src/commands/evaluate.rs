//! Evaluate command - Classify one price proposal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use sync_governance::{GovernancePolicy, Outcome, PriceProposal, ProposalClassifier};

use crate::ExitCodes;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Product sku
    #[arg(long, default_value = "")]
    sku: String,

    /// Proposed retail price
    #[arg(long)]
    price: f64,

    /// Current wholesale price, if known
    #[arg(long)]
    wholesale: Option<f64>,

    /// Current retail price, if known
    #[arg(long)]
    current: Option<f64>,

    /// Product category, if known
    #[arg(long)]
    category: Option<String>,

    /// Governance policy YAML; defaults apply when omitted
    #[arg(long)]
    policy: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<u8> {
    let policy = match &args.policy {
        Some(path) => GovernancePolicy::from_yaml_file(path)
            .with_context(|| format!("failed to load policy from {}", path.display()))?,
        None => GovernancePolicy::default(),
    };

    let mut proposal = PriceProposal::new(&args.sku, args.price);
    proposal.current_wholesale_price = args.wholesale;
    proposal.current_retail_price = args.current;
    proposal.category = args.category.clone();

    let verdict = ProposalClassifier::classify(&proposal, &policy);
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    match verdict.outcome {
        Outcome::Accepted => {
            info!(sku = %verdict.sku, "proposal accepted");
            Ok(ExitCodes::SUCCESS)
        }
        Outcome::Rejected => Ok(ExitCodes::VALIDATION_FAILURE),
    }
}
