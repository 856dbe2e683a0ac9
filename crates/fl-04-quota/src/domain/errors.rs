//! Quota subsystem errors.

use chrono::{DateTime, Utc};
use shared_types::{PeriodType, UsageKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuotaError {
    /// A daily or monthly cap was reached. Daily breaches are reported
    /// before monthly ones so the caller sees the sooner reset.
    #[error("{period} {kind} quota exceeded ({current_usage}/{limit})")]
    Exceeded {
        kind: UsageKind,
        period: PeriodType,
        current_usage: u64,
        limit: u64,
        resets_at: DateTime<Utc>,
    },

    #[error("usage store unavailable: {0}")]
    Store(String),
}
