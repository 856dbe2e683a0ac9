//! Match engine error types.

use fl_02_registry::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or missing required fields; rejected before touching storage.
    #[error("validation error: {0}")]
    Validation(String),

    /// Fingerprint absent on unregister.
    #[error("fingerprint not found")]
    NotFound,

    /// Unregister by a non-owner, or the row has no recorded owner.
    #[error("caller does not own this registration")]
    Forbidden,

    /// Unregister attempted outside the rollback window. Distinct from
    /// `Forbidden`: a time-boxed policy, not an ownership question.
    #[error("unregister window has expired")]
    UnregisterWindowExpired,

    /// Storage failure; surfaced to the caller, never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}
