//! # sync_governance
//!
//! Pricing governance for SupplierSync: every price change an agent
//! proposes is evaluated against an ordered rule set, and the resulting
//! verdict, accepted or rejected, is appended to an audit log.
//!
//! This crate provides:
//! - **GovernancePolicy**: caller-supplied thresholds and lists (minimum
//!   margin, maximum daily drift, category allow/block lists, MAP floors),
//!   loadable from YAML.
//! - **ProposalClassifier**: a pure, ordered rule evaluation; the first
//!   failing rule names the one reason code a rejection carries.
//! - **GovernanceLog**: append-only record of verdicts, with the
//!   rejected-only view the operator console shows.
//!
//! # Example
//!
//! ```rust
//! use sync_governance::{GovernanceLog, GovernancePolicy, Outcome, PriceProposal, ReasonCode};
//!
//! let policy = GovernancePolicy::default();
//! let log = GovernanceLog::new();
//!
//! let verdict = log.evaluate(
//!     &PriceProposal::new("WF-001", 8.0).with_wholesale_price(10.0),
//!     &policy,
//! );
//! assert_eq!(verdict.outcome, Outcome::Rejected);
//! assert_eq!(verdict.reason_code, Some(ReasonCode::RetailBelowWholesale));
//! ```

pub mod classifier;
pub mod error;
pub mod log;
pub mod policy;
pub mod proposal;
pub mod verdict;

pub use classifier::ProposalClassifier;
pub use error::{GovernanceError, GovernanceResult};
pub use log::{GovernanceCounts, GovernanceLog};
pub use policy::GovernancePolicy;
pub use proposal::PriceProposal;
pub use verdict::{GovernanceVerdict, Outcome, ReasonCode};
