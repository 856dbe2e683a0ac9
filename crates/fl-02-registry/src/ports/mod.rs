//! # Driven Ports
//!
//! Interfaces a host must implement to persist registry rows.
//!
//! Production deployments back these with SQL; the in-memory adapters in
//! `adapters/memory.rs` provide the same atomicity guarantees for tests and
//! embedded use.

use crate::domain::entities::{DocumentRecord, PartyRecord};
use crate::domain::errors::StoreError;
use chrono::{DateTime, Utc};
use shared_types::{Fingerprint, FunderId, PartyRole};

/// Store of document fingerprints claimed as funded.
pub trait DocumentStore: Send + Sync {
    /// Look up a fingerprint. Returns expired rows too; callers apply the
    /// expiry filter so "expired" and "deleted" stay distinguishable in audit
    /// paths.
    fn find(&self, hash: &Fingerprint) -> Result<Option<DocumentRecord>, StoreError>;

    /// Insert unless the fingerprint already exists.
    ///
    /// Returns `true` if this call created the row. Under concurrent inserts
    /// of the same fingerprint exactly one caller sees `true`; every other
    /// caller sees `false` with no error and no duplicate row.
    fn insert_if_absent(&self, record: DocumentRecord) -> Result<bool, StoreError>;

    /// Delete a fingerprint row. Returns `true` if a row was removed.
    fn remove(&self, hash: &Fingerprint) -> Result<bool, StoreError>;

    /// Delete every row attributed to `owner` (account cleanup). Returns the
    /// number of rows removed.
    fn remove_by_owner(&self, owner: FunderId) -> Result<u64, StoreError>;

    /// Delete rows whose `expires_at` is before `now`. Returns the number
    /// removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Total stored rows.
    fn count(&self) -> Result<u64, StoreError>;
}

/// Result of an atomic party-row upsert.
#[derive(Debug, Clone)]
pub struct PartyUpsert {
    /// Row state after the update.
    pub record: PartyRecord,
    /// Whether this call created the row.
    pub created: bool,
}

/// Store of aggregate party activity counters.
pub trait PartyStore: Send + Sync {
    fn find(&self, hash: &Fingerprint, role: PartyRole) -> Result<Option<PartyRecord>, StoreError>;

    /// Record a check: create the row with `check_count = 1`, or atomically
    /// increment `check_count` and advance `last_checked_at`.
    ///
    /// `checker` is stored as `first_checker` only on creation and only when
    /// the caller consented to attribution.
    fn record_check(
        &self,
        hash: &Fingerprint,
        role: PartyRole,
        checker: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<PartyUpsert, StoreError>;

    /// Record a registration: create the row pre-populated as registered, or
    /// atomically increment `register_count`, advance `last_registered_at`,
    /// and fill `first_registered_at` / `first_registerer` iff still unset.
    fn record_register(
        &self,
        hash: &Fingerprint,
        role: PartyRole,
        registerer: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<PartyUpsert, StoreError>;
}
