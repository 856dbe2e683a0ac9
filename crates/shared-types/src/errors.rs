//! Validation errors for shared primitives.

use thiserror::Error;

/// Errors produced when parsing shared domain primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Fingerprint is not the expected hex width.
    #[error("fingerprint must be {expected} hex characters, got {actual}")]
    FingerprintLength { expected: usize, actual: usize },

    /// Fingerprint contains non-hex characters.
    #[error("fingerprint must be hexadecimal")]
    FingerprintNotHex,
}
