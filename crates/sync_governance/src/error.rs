//! Error types for the governance module.

use thiserror::Error;

/// Result type alias for governance operations.
pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Errors that can occur during governance operations.
///
/// Note that classifying a proposal never errors: malformed proposal data
/// is a classifiable outcome (`missing_sku`, `invalid_price_format`), not
/// an exception, so the audit trail stays complete.
#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Invalid policy configuration: {0}")]
    InvalidPolicy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
