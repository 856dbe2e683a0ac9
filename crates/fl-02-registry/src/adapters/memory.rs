//! In-memory store adapters backed by `DashMap`.
//!
//! Per-key atomicity comes from the entry API: an entry guard holds the
//! shard lock for the duration of the upsert, so concurrent callers against
//! the same fingerprint serialize and no increment is lost.

use crate::domain::entities::{DocumentRecord, PartyRecord};
use crate::domain::errors::StoreError;
use crate::ports::{DocumentStore, PartyStore, PartyUpsert};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{Fingerprint, FunderId, PartyRole};
use tracing::debug;

/// In-memory document fingerprint store.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    rows: DashMap<Fingerprint, DocumentRecord>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn find(&self, hash: &Fingerprint) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self.rows.get(hash).map(|r| r.clone()))
    }

    fn insert_if_absent(&self, record: DocumentRecord) -> Result<bool, StoreError> {
        match self.rows.entry(record.hash_value.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                debug!(hash = %record.hash_value, level = record.level, "storing document fingerprint");
                slot.insert(record);
                Ok(true)
            }
        }
    }

    fn remove(&self, hash: &Fingerprint) -> Result<bool, StoreError> {
        Ok(self.rows.remove(hash).is_some())
    }

    fn remove_by_owner(&self, owner: FunderId) -> Result<u64, StoreError> {
        let before = self.rows.len();
        self.rows.retain(|_, rec| rec.owner != Some(owner));
        Ok((before - self.rows.len()) as u64)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let before = self.rows.len();
        self.rows.retain(|_, rec| !rec.is_expired(now));
        Ok((before - self.rows.len()) as u64)
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.rows.len() as u64)
    }
}

/// In-memory party counter store, keyed by `(fingerprint, role)`.
#[derive(Default)]
pub struct InMemoryPartyStore {
    rows: DashMap<(Fingerprint, PartyRole), PartyRecord>,
}

impl InMemoryPartyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PartyStore for InMemoryPartyStore {
    fn find(&self, hash: &Fingerprint, role: PartyRole) -> Result<Option<PartyRecord>, StoreError> {
        Ok(self.rows.get(&(hash.clone(), role)).map(|r| r.clone()))
    }

    fn record_check(
        &self,
        hash: &Fingerprint,
        role: PartyRole,
        checker: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<PartyUpsert, StoreError> {
        match self.rows.entry((hash.clone(), role)) {
            Entry::Occupied(mut slot) => {
                let rec = slot.get_mut();
                rec.check_count += 1;
                rec.last_checked_at = now;
                Ok(PartyUpsert {
                    record: rec.clone(),
                    created: false,
                })
            }
            Entry::Vacant(slot) => {
                debug!(hash = %hash, role = %role, "creating party row (check)");
                let rec = PartyRecord::new_checked(hash.clone(), role, checker, now);
                slot.insert(rec.clone());
                Ok(PartyUpsert {
                    record: rec,
                    created: true,
                })
            }
        }
    }

    fn record_register(
        &self,
        hash: &Fingerprint,
        role: PartyRole,
        registerer: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<PartyUpsert, StoreError> {
        match self.rows.entry((hash.clone(), role)) {
            Entry::Occupied(mut slot) => {
                let rec = slot.get_mut();
                rec.register_count += 1;
                rec.last_registered_at = Some(now);
                // Coalesce: first-seen fields are filled at most once.
                if rec.first_registered_at.is_none() {
                    rec.first_registered_at = Some(now);
                }
                if rec.first_registerer.is_none() {
                    rec.first_registerer = registerer;
                }
                Ok(PartyUpsert {
                    record: rec.clone(),
                    created: false,
                })
            }
            Entry::Vacant(slot) => {
                debug!(hash = %hash, role = %role, "creating party row (register)");
                let rec = PartyRecord::new_registered(hash.clone(), role, registerer, now);
                slot.insert(rec.clone());
                Ok(PartyUpsert {
                    record: rec,
                    created: true,
                })
            }
        }
    }
}
