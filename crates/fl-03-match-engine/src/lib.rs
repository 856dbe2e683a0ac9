//! # Match Engine Subsystem
//!
//! Decides whether a set of fingerprints matches anything already claimed in
//! the registry, and performs register/unregister and party-level operations.
//!
//! ## Match aggregation
//!
//! A check request carries document fingerprints in ascending level order
//! (L1..L3, at most three). Every supplied level is probed; matches are NOT
//! short-circuited; the full union of non-expired matches comes back, so a
//! caller holding more detail than the registrant still learns exactly which
//! levels agree. Party probes (`L0_supplier`, `L0_buyer`) are optional
//! augmentation, ordered before the document levels.
//!
//! ```text
//! NoMatch ──L0 hit──▶ PartyOnlyMatch ──L1..L3 hit──▶ DocumentMatch(level)
//! ```
//!
//! ## Privacy
//!
//! Party responses reveal *that* another funder interacted with an identity,
//! never *which* funder (k-anonymity disclosure). Attribution is stored only
//! with per-call consent.

pub mod domain;
pub mod engine;
pub mod party;

pub use domain::errors::EngineError;
pub use domain::responses::*;
pub use engine::{
    MatchEngine, RegisterOptions, DEFAULT_UNREGISTER_WINDOW_HOURS, MAX_DOCUMENT_FINGERPRINTS,
};
