//! # HashChain Subsystem
//!
//! Normalizes raw invoice and party identity fields into a stable textual
//! form and derives keyed, one-way fingerprint chains from them.
//!
//! ## Disclosure levels
//!
//! | Level | Preimage | Requires |
//! |-------|----------|----------|
//! | L0 | `tax_id\|country` | per party (buyer / supplier) |
//! | L1 | `doc_type\|sup_tax\|sup_cc\|buy_tax\|buy_cc` | both parties |
//! | L2 | `L1 preimage\|document_id` | document id |
//! | L3 | `L2 preimage\|amount\|currency` | amount and currency |
//!
//! Chaining embeds the previous level's *preimage*, not its hash: two parties
//! holding different amounts of detail about the same invoice still agree on
//! the lower levels, and no fingerprint can be derived from another.
//!
//! All digests are HMAC-SHA256 keyed with the registry operator's secret,
//! rendered as 64 lowercase hex characters. The secret is injected once at
//! construction and never threaded through call signatures.

pub mod chain;
pub mod invoice;
pub mod normalize;

pub use chain::{DocumentFingerprints, HashChain, NamedFingerprints};
pub use invoice::{CanonicalInvoice, RawInvoice, DEFAULT_DOCUMENT_TYPE};
