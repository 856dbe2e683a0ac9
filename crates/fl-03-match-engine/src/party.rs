//! Party-level (L0) operations.
//!
//! These are counterparty reputation probes: a funder asks whether anyone
//! else has checked or registered against a given tax identity, without ever
//! learning who. The "others" figures are approximate on purpose. Only the
//! first interactor's identity is retained, so the counters attribute all
//! activity to that funder; when the caller is the first interactor the
//! counters collapse to zero.

use crate::domain::errors::EngineError;
use crate::domain::responses::{
    PartyCheckOutcome, PartyHistoryOutcome, PartyRegisterOutcome, PartyStatus,
};
use crate::engine::MatchEngine;
use chrono::{DateTime, Duration, Utc};
use shared_types::{FunderId, PartyRole};
use tracing::debug;

impl MatchEngine {
    /// Record a check against a party identity and report its prior history.
    ///
    /// The check itself is counted (unlike the passive party probe in a
    /// document check), so calling this repeatedly moves `check_count`.
    pub fn party_check(
        &self,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        funder: FunderId,
        track_attribution: bool,
        now: DateTime<Utc>,
    ) -> Result<PartyCheckOutcome, EngineError> {
        validate_party_fields(tax_id, country)?;
        let fingerprint = self.chain().party_fingerprint(tax_id, country);
        let checker = track_attribution.then_some(funder);
        let upsert = self.parties().record_check(&fingerprint, role, checker, now)?;

        if upsert.created {
            return Ok(PartyCheckOutcome {
                found: false,
                role,
                status: PartyStatus::New,
                first_seen: None,
                last_checked: None,
                last_registered: None,
                checked_by_others: false,
                registered_by_others: false,
            });
        }

        let record = upsert.record;
        let status = if record.register_count > 0 {
            PartyStatus::Registered
        } else {
            PartyStatus::Checked
        };
        Ok(PartyCheckOutcome {
            found: true,
            role,
            status,
            first_seen: Some(record.first_checked_at),
            last_checked: Some(record.last_checked_at),
            last_registered: record.last_registered_at,
            checked_by_others: interacted_by_other(record.first_checker, funder),
            registered_by_others: interacted_by_other(record.first_registerer, funder),
        })
    }

    /// Record that the caller has funded (or committed to fund) this party.
    pub fn party_register(
        &self,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        funder: FunderId,
        track_attribution: bool,
        now: DateTime<Utc>,
    ) -> Result<PartyRegisterOutcome, EngineError> {
        validate_party_fields(tax_id, country)?;
        let fingerprint = self.chain().party_fingerprint(tax_id, country);
        let registerer = track_attribution.then_some(funder);
        let upsert = self
            .parties()
            .record_register(&fingerprint, role, registerer, now)?;

        debug!(role = ?role, is_new = upsert.created, "registered party activity");
        Ok(PartyRegisterOutcome {
            success: true,
            registered_at: now,
            is_new: upsert.created,
        })
    }

    /// Read aggregate history for a party identity without touching counters.
    ///
    /// `lookback_days` is clamped to the caller's plan ceiling; rows whose
    /// latest activity predates the lookback horizon are reported as absent.
    pub fn party_history(
        &self,
        tax_id: &str,
        country: &str,
        role: PartyRole,
        lookback_days: Option<u32>,
        max_lookback_days: u32,
        funder: FunderId,
        now: DateTime<Utc>,
    ) -> Result<PartyHistoryOutcome, EngineError> {
        validate_party_fields(tax_id, country)?;
        let lookback = lookback_days
            .unwrap_or(max_lookback_days)
            .min(max_lookback_days);
        let since = now - Duration::days(i64::from(lookback));

        let fingerprint = self.chain().party_fingerprint(tax_id, country);
        let record = match self.parties().find(&fingerprint, role)? {
            Some(record) if record.active_since(since) => record,
            _ => return Ok(PartyHistoryOutcome::absent(role)),
        };

        let other_checked = if interacted_by_other(record.first_checker, funder) {
            record.check_count
        } else {
            0
        };
        let other_registered = if interacted_by_other(record.first_registerer, funder) {
            record.register_count
        } else {
            0
        };
        Ok(PartyHistoryOutcome {
            found: true,
            role,
            first_checked_at: Some(record.first_checked_at),
            last_checked_at: Some(record.last_checked_at),
            check_count: record.check_count,
            register_count: record.register_count,
            other_funders_checked: other_checked,
            other_funders_registered: other_registered,
        })
    }
}

/// True when the identity slot is filled by somebody other than the caller.
/// An empty slot means the interactor withheld attribution, which is
/// indistinguishable from "nobody" and reported as such.
fn interacted_by_other(first: Option<FunderId>, caller: FunderId) -> bool {
    matches!(first, Some(other) if other != caller)
}

fn validate_party_fields(tax_id: &str, country: &str) -> Result<(), EngineError> {
    if tax_id.trim().is_empty() || country.trim().is_empty() {
        return Err(EngineError::Validation(
            "tax_id and country are required".into(),
        ));
    }
    Ok(())
}
