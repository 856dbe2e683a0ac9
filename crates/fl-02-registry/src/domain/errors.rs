//! Store error types.

use thiserror::Error;

/// Failures surfaced by a store implementation.
///
/// The registry core never retries internally; transient failures propagate
/// to the caller, which owns retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backing storage is unreachable or rejected the operation transiently.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the row as malformed (adapter-specific).
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
