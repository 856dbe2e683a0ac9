//! Operation result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::PartyRole;
use std::collections::HashMap;

/// Whether a matched fingerprint carries a funding record or was only ever
/// probed at party level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Checked,
    Registered,
}

/// Detail for one matched level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetail {
    pub status: MatchStatus,
    pub first_seen: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

/// Aggregated result of a check operation.
///
/// `matched_levels` preserves probe order: `L0_supplier`, `L0_buyer`, then
/// `L1`..`L3`. `found` is true iff the union of matches is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub found: bool,
    pub matched_levels: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub details: HashMap<String, MatchDetail>,
}

impl CheckOutcome {
    pub(crate) fn push(&mut self, level: impl Into<String>, detail: MatchDetail) {
        let level = level.into();
        self.found = true;
        self.matched_levels.push(level.clone());
        self.details.insert(level, detail);
    }
}

/// Result of a register operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterOutcome {
    pub success: bool,
    pub registered_at: DateTime<Utc>,
    /// Levels (1-3) actually written by this call; already-present levels are
    /// silently skipped.
    pub levels_registered: Vec<u8>,
}

/// Lifecycle state of a party row as seen by a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    /// This check created the row.
    New,
    /// Row exists but has never been registered.
    Checked,
    /// Row has at least one registration.
    Registered,
}

/// Result of a party check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyCheckOutcome {
    pub found: bool,
    pub role: PartyRole,
    pub status: PartyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_registered: Option<DateTime<Utc>>,
    /// Some other funder checked this identity. Never reveals which one.
    pub checked_by_others: bool,
    /// Some other funder registered this identity. Never reveals which one.
    pub registered_by_others: bool,
}

/// Result of a party registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRegisterOutcome {
    pub success: bool,
    pub registered_at: DateTime<Utc>,
    /// True iff this call created the row.
    pub is_new: bool,
}

/// Result of a party history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyHistoryOutcome {
    pub found: bool,
    pub role: PartyRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_checked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<DateTime<Utc>>,
    pub check_count: u64,
    pub register_count: u64,
    /// Approximate; derived from first-interactor identity only.
    pub other_funders_checked: u64,
    pub other_funders_registered: u64,
}

impl PartyHistoryOutcome {
    /// History for an identity with no (recent enough) activity.
    pub(crate) fn absent(role: PartyRole) -> Self {
        Self {
            found: false,
            role,
            first_checked_at: None,
            last_checked_at: None,
            check_count: 0,
            register_count: 0,
            other_funders_checked: 0,
            other_funders_registered: 0,
        }
    }
}
