//! Document check/register/unregister operations.

use crate::domain::errors::EngineError;
use crate::domain::responses::{CheckOutcome, MatchDetail, MatchStatus, RegisterOutcome};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use fl_01_hashchain::{HashChain, RawInvoice, DEFAULT_DOCUMENT_TYPE};
use fl_02_registry::{DocumentRecord, DocumentStore, PartyStore};
use shared_types::{DisclosureLevel, Fingerprint, FunderId, PartyRole};
use std::sync::Arc;
use tracing::debug;

/// A check or register call may carry at most L1, L2 and L3.
pub const MAX_DOCUMENT_FINGERPRINTS: usize = 3;

/// Default rollback window for unregistering a fresh registration.
pub const DEFAULT_UNREGISTER_WINDOW_HOURS: i64 = 24;

/// Options accompanying a register operation.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    pub document_type: String,
    /// ISO 8601 calendar date; unparseable dates fall back to today.
    pub funding_date: String,
    /// Consent to store the caller's identity on the rows written.
    pub track_attribution: bool,
    pub expires_in_days: Option<i64>,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            funding_date: String::new(),
            track_attribution: false,
            expires_in_days: None,
        }
    }
}

/// The matching core: probes and mutates the document and party registries
/// through their ports, deriving fingerprints server-side when handed raw
/// fields.
pub struct MatchEngine {
    documents: Arc<dyn DocumentStore>,
    parties: Arc<dyn PartyStore>,
    chain: Arc<HashChain>,
    unregister_window: Duration,
}

impl MatchEngine {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        parties: Arc<dyn PartyStore>,
        chain: Arc<HashChain>,
    ) -> Self {
        Self {
            documents,
            parties,
            chain,
            unregister_window: Duration::hours(DEFAULT_UNREGISTER_WINDOW_HOURS),
        }
    }

    pub fn with_unregister_window(mut self, window: Duration) -> Self {
        self.unregister_window = window;
        self
    }

    pub(crate) fn parties(&self) -> &Arc<dyn PartyStore> {
        &self.parties
    }

    pub(crate) fn chain(&self) -> &Arc<HashChain> {
        &self.chain
    }

    /// Probe the registry for each supplied fingerprint.
    ///
    /// Fingerprints must arrive in ascending level order (index 0 is L1).
    /// Supplying more than three is a caller bug and is rejected outright
    /// rather than being silently folded onto a level.
    pub fn check_fingerprints(
        &self,
        fingerprints: &[Fingerprint],
        now: DateTime<Utc>,
    ) -> Result<CheckOutcome, EngineError> {
        validate_fingerprint_count(fingerprints.len())?;

        let mut outcome = CheckOutcome::default();
        for (index, fingerprint) in fingerprints.iter().enumerate() {
            let level = DisclosureLevel::from_index(index)
                .ok_or_else(|| EngineError::Validation("too many fingerprints".into()))?;
            if let Some(record) = self.documents.find(fingerprint)? {
                if record.is_expired(now) {
                    continue;
                }
                outcome.push(
                    level.label(),
                    MatchDetail {
                        status: MatchStatus::Registered,
                        first_seen: record.created_at,
                        registered_at: Some(record.funded_at),
                    },
                );
            }
        }
        Ok(outcome)
    }

    /// Server-side variant: normalize and fingerprint raw fields, then check.
    ///
    /// With `include_party` set, the supplier and buyer identities are probed
    /// against the party registry as read-only lookups (no counters move) and
    /// any hits are ordered before the document levels.
    pub fn check_raw(
        &self,
        raw: &RawInvoice,
        include_party: bool,
        now: DateTime<Utc>,
    ) -> Result<CheckOutcome, EngineError> {
        let invoice = raw.canonicalize();
        validate_parties(&invoice)?;

        let named = self.chain.all_fingerprints(&invoice);
        let documents = named
            .documents
            .as_ref()
            .ok_or_else(|| EngineError::Validation("party identity fields required".into()))?;

        let mut outcome = CheckOutcome::default();
        if include_party {
            let probes = [
                ("L0_supplier", named.l0_supplier.as_ref(), PartyRole::Supplier),
                ("L0_buyer", named.l0_buyer.as_ref(), PartyRole::Buyer),
            ];
            for (label, fingerprint, role) in probes {
                let Some(fingerprint) = fingerprint else {
                    continue;
                };
                if let Some(record) = self.parties.find(fingerprint, role)? {
                    let status = if record.register_count > 0 {
                        MatchStatus::Registered
                    } else {
                        MatchStatus::Checked
                    };
                    outcome.push(
                        label,
                        MatchDetail {
                            status,
                            first_seen: record.first_checked_at,
                            registered_at: record.first_registered_at,
                        },
                    );
                }
            }
        }

        let document_outcome = self.check_fingerprints(&documents.to_vec(), now)?;
        outcome.found |= document_outcome.found;
        outcome.matched_levels.extend(document_outcome.matched_levels);
        outcome.details.extend(document_outcome.details);
        Ok(outcome)
    }

    /// Claim fingerprints as funded. Idempotent: levels already present are
    /// skipped silently and omitted from `levels_registered`.
    pub fn register_fingerprints(
        &self,
        fingerprints: &[Fingerprint],
        options: &RegisterOptions,
        funder: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome, EngineError> {
        validate_fingerprint_count(fingerprints.len())?;

        let funded_at = parse_funding_date(&options.funding_date, now);
        let expires_at = options
            .expires_in_days
            .filter(|days| *days > 0)
            .map(|days| now + Duration::days(days));
        let owner = if options.track_attribution { funder } else { None };
        let document_type = if options.document_type.trim().is_empty() {
            DEFAULT_DOCUMENT_TYPE.to_string()
        } else {
            options.document_type.trim().to_uppercase()
        };

        let mut levels_registered = Vec::with_capacity(fingerprints.len());
        for (index, fingerprint) in fingerprints.iter().enumerate() {
            let level = DisclosureLevel::from_index(index)
                .ok_or_else(|| EngineError::Validation("too many fingerprints".into()))?;
            let record = DocumentRecord::new(
                fingerprint.clone(),
                level,
                document_type.clone(),
                funded_at,
                owner,
                expires_at,
                now,
            );
            if self.documents.insert_if_absent(record)? {
                levels_registered.push(level.as_u8());
            }
        }

        debug!(
            levels = ?levels_registered,
            attributed = owner.is_some(),
            "registered document fingerprints"
        );
        Ok(RegisterOutcome {
            success: true,
            registered_at: now,
            levels_registered,
        })
    }

    /// Server-side variant of register.
    pub fn register_raw(
        &self,
        raw: &RawInvoice,
        options: &RegisterOptions,
        funder: Option<FunderId>,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome, EngineError> {
        let invoice = raw.canonicalize();
        validate_parties(&invoice)?;
        let documents = self
            .chain
            .document_fingerprints(&invoice)
            .ok_or_else(|| EngineError::Validation("party identity fields required".into()))?;
        self.register_fingerprints(&documents.to_vec(), options, funder, now)
    }

    /// Roll back a registration.
    ///
    /// Permitted only to the recorded owner (an unattributed row belongs to
    /// no one and can never be unregistered), and only within the rollback
    /// window measured from the row's creation.
    pub fn unregister(
        &self,
        fingerprint: &Fingerprint,
        funder: FunderId,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let record = self.documents.find(fingerprint)?.ok_or(EngineError::NotFound)?;

        match record.owner {
            Some(owner) if owner == funder => {}
            _ => return Err(EngineError::Forbidden),
        }
        if now - record.created_at > self.unregister_window {
            return Err(EngineError::UnregisterWindowExpired);
        }

        self.documents.remove(fingerprint)?;
        debug!(hash = %fingerprint, "unregistered document fingerprint");
        Ok(())
    }
}

fn validate_fingerprint_count(count: usize) -> Result<(), EngineError> {
    if count == 0 {
        return Err(EngineError::Validation(
            "at least one fingerprint is required".into(),
        ));
    }
    if count > MAX_DOCUMENT_FINGERPRINTS {
        return Err(EngineError::Validation(format!(
            "at most {MAX_DOCUMENT_FINGERPRINTS} fingerprints allowed, got {count}"
        )));
    }
    Ok(())
}

fn validate_parties(invoice: &fl_01_hashchain::CanonicalInvoice) -> Result<(), EngineError> {
    if !invoice.has_supplier() {
        return Err(EngineError::Validation(
            "supplier_tax_id and supplier_country are required".into(),
        ));
    }
    if !invoice.has_buyer() {
        return Err(EngineError::Validation(
            "buyer_tax_id and buyer_country are required".into(),
        ));
    }
    Ok(())
}

/// Funding dates arrive as ISO calendar dates; anything unparseable falls
/// back to the time of the call.
fn parse_funding_date(date: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(now)
}
