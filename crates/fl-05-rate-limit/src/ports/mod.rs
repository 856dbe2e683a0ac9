//! Outbound port for rate counters.

use chrono::{DateTime, Utc};
use shared_types::{FunderId, PeriodType};

use crate::domain::RateLimitError;

/// Per-tenant request counters, one per `(funder, period)` window.
///
/// The window is identified by its start date; implementations must make
/// `increment` atomic per counter.
pub trait CounterStore: Send + Sync {
    fn count(
        &self,
        funder: FunderId,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError>;

    /// Add one to the window containing `now`; returns the new total.
    fn increment(
        &self,
        funder: FunderId,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError>;
}
