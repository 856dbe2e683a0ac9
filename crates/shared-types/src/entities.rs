//! Core registry identifiers and disclosure-level taxonomy.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a funder (tenant). Opaque to the matching core; issued and
/// validated by the authentication collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunderId(pub Uuid);

impl FunderId {
    /// Generate a fresh random funder id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FunderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hex width of an HMAC-SHA256 fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// A keyed one-way hash of normalized invoice or party fields.
///
/// Always 64 lowercase hex characters; never reversible to the original data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse and validate a fingerprint string.
    ///
    /// Accepts upper- or lowercase hex and canonicalizes to lowercase.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let trimmed = value.trim();
        if trimmed.len() != FINGERPRINT_HEX_LEN {
            return Err(TypeError::FingerprintLength {
                expected: FINGERPRINT_HEX_LEN,
                actual: trimmed.len(),
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::FingerprintNotHex);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Wrap a digest already known to be 64 lowercase hex chars
    /// (the output of the hash chain itself).
    pub fn from_digest(digest: String) -> Self {
        debug_assert_eq!(digest.len(), FINGERPRINT_HEX_LEN);
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How much invoice detail a fingerprint encodes.
///
/// Document fingerprints are chained: each level's preimage embeds the
/// previous level's preimage, so L3 existing implies L2 and L1 exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisclosureLevel {
    /// L0: party identity only (tax id + country), buyer or supplier.
    Party,
    /// L1: document type + both party identities.
    DocType,
    /// L2: L1 + document id.
    Document,
    /// L3: L2 + amount + currency.
    Full,
}

impl DisclosureLevel {
    /// Numeric level (0-3), matching stored `disclosure_level` values.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Party => 0,
            Self::DocType => 1,
            Self::Document => 2,
            Self::Full => 3,
        }
    }

    /// Wire name used in match results.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Party => "L0_party",
            Self::DocType => "L1_doc_type",
            Self::Document => "L2_document",
            Self::Full => "L3_full",
        }
    }

    /// Short label used in ordered match-level lists (`L1`..`L3`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Party => "L0",
            Self::DocType => "L1",
            Self::Document => "L2",
            Self::Full => "L3",
        }
    }

    /// Map a zero-based position in an ascending-level fingerprint list to
    /// its document level (0 -> L1, 1 -> L2, 2 -> L3).
    ///
    /// Out-of-range positions are a caller bug and yield `None`; callers must
    /// reject them rather than guessing a level.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::DocType),
            1 => Some(Self::Document),
            2 => Some(Self::Full),
            _ => None,
        }
    }
}

impl fmt::Display for DisclosureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Role a party plays on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Buyer,
    Supplier,
}

impl PartyRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Supplier => "supplier",
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
