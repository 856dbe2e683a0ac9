//! Outbound port for usage persistence.

use chrono::{DateTime, Utc};
use shared_types::{FunderId, PeriodType, UsageKind};

use crate::domain::errors::QuotaError;
use crate::domain::report::MonthlyUsage;

/// Per-tenant usage counters and one-shot warning markers.
///
/// Counters are scoped to `(funder, kind, period)` where the period is
/// identified by its start date; a new period starts at zero implicitly.
/// Implementations must make `increment` atomic per counter. Counters are
/// never deleted once written; they are the audit record behind
/// [`history`](UsageStore::history).
pub trait UsageStore: Send + Sync {
    /// Current count for the period containing `now`.
    fn usage(
        &self,
        funder: FunderId,
        kind: UsageKind,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaError>;

    /// Add one to the counter for the period containing `now`; returns the
    /// new total.
    fn increment(
        &self,
        funder: FunderId,
        kind: UsageKind,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaError>;

    /// Per-month usage totals, newest month first, at most `months` rows.
    /// Months with no recorded usage yield no row.
    fn history(&self, funder: FunderId, months: usize) -> Result<Vec<MonthlyUsage>, QuotaError>;

    /// Record that a warning at `threshold` percent went out for the
    /// calendar month containing `now`. Returns true iff this call created
    /// the marker, so exactly one caller wins the right to send.
    fn mark_warning_sent(
        &self,
        funder: FunderId,
        threshold: u8,
        now: DateTime<Utc>,
    ) -> Result<bool, QuotaError>;
}
