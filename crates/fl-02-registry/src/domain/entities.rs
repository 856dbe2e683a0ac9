//! Registry row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{DisclosureLevel, Fingerprint, FunderId, PartyRole};
use uuid::Uuid;

/// A document fingerprint claimed as funded.
///
/// `hash_value` is globally unique. A record, once registered, is immutable
/// except for deletion; `owner` is `None` iff the registering funder withheld
/// attribution consent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub hash_value: Fingerprint,
    /// Disclosure level 1-3 of the fingerprint.
    pub level: u8,
    pub document_type: String,
    pub funded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<FunderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(
        hash_value: Fingerprint,
        level: DisclosureLevel,
        document_type: String,
        funded_at: DateTime<Utc>,
        owner: Option<FunderId>,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hash_value,
            level: level.as_u8(),
            document_type,
            funded_at,
            owner,
            expires_at,
            created_at: now,
        }
    }

    /// Expired records are treated as absent by all lookups.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if expiry < now)
    }
}

/// Aggregate check/registration counters for one `(fingerprint, role)` pair.
///
/// Counters are monotonically non-decreasing; `first_*` fields are filled at
/// most once and never overwritten. `register_count > 0` implies
/// `first_registered_at` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRecord {
    pub id: Uuid,
    pub hash_value: Fingerprint,
    pub role: PartyRole,
    pub first_checked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_registered_at: Option<DateTime<Utc>>,
    pub last_checked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_registered_at: Option<DateTime<Utc>>,
    pub check_count: u64,
    pub register_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_checker: Option<FunderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_registerer: Option<FunderId>,
    pub created_at: DateTime<Utc>,
}

impl PartyRecord {
    /// Fresh row seeded by a check.
    pub fn new_checked(
        hash_value: Fingerprint,
        role: PartyRole,
        checker: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hash_value,
            role,
            first_checked_at: now,
            first_registered_at: None,
            last_checked_at: now,
            last_registered_at: None,
            check_count: 1,
            register_count: 0,
            first_checker: checker,
            first_registerer: None,
            created_at: now,
        }
    }

    /// Fresh row seeded by a registration (counts as one check too).
    pub fn new_registered(
        hash_value: Fingerprint,
        role: PartyRole,
        registerer: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            hash_value,
            role,
            first_checked_at: now,
            first_registered_at: Some(now),
            last_checked_at: now,
            last_registered_at: Some(now),
            check_count: 1,
            register_count: 1,
            first_checker: registerer,
            first_registerer: registerer,
            created_at: now,
        }
    }

    /// Whether any check or registration happened at or after `since`.
    pub fn active_since(&self, since: DateTime<Utc>) -> bool {
        self.last_checked_at >= since
            || matches!(self.last_registered_at, Some(at) if at >= since)
    }
}
