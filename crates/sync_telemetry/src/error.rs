//! Error types for the telemetry module.

use thiserror::Error;

/// Result type alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors that can occur during telemetry operations.
///
/// Validation failures are always recoverable for the caller: reject the
/// single offending record and keep going, never abort a batch.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Record validation failed: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
