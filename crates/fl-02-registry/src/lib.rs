//! # Registry Subsystem
//!
//! Durable stores for claimed document fingerprints and aggregate party
//! activity counters. No document content is ever stored; rows hold only
//! one-way fingerprints, attribution (consent-gated), and timestamps.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! domain/   - DocumentRecord, PartyRecord entities + StoreError
//! ports/    - DocumentStore, PartyStore driven-port traits
//! adapters/ - InMemoryDocumentStore, InMemoryPartyStore (DashMap-backed)
//! ```
//!
//! ## Concurrency contract
//!
//! - `DocumentStore::insert_if_absent` is the double-funding linchpin:
//!   concurrent inserts of the same fingerprint resolve to exactly one
//!   winner, and losers observe a clean "already present" outcome.
//! - `PartyStore::record_check` / `record_register` are atomic per
//!   `(fingerprint, role)` key: counters never lose updates and first-seen
//!   fields are filled at most once (coalesce upsert).

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::memory::{InMemoryDocumentStore, InMemoryPartyStore};
pub use domain::entities::{DocumentRecord, PartyRecord};
pub use domain::errors::StoreError;
pub use ports::{DocumentStore, PartyStore, PartyUpsert};
