//! Usage reporting types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Limit, PeriodType, UsageKind};

/// Usage against one cap within one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodUsage {
    pub used: u64,
    pub limit: Limit,
    /// Percent of the cap consumed; 0.0 when the cap is open.
    pub percent: f64,
    pub resets_at: DateTime<Utc>,
}

/// Daily and monthly usage for one operation family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindUsage {
    pub kind: UsageKind,
    pub daily: PeriodUsage,
    pub monthly: PeriodUsage,
}

/// Full usage picture for one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageReport {
    pub tier_name: String,
    pub kinds: Vec<KindUsage>,
    /// `""`, `"warning"` (>= 80%) or `"critical"` (>= 90%), from the highest
    /// percentage across the document-operation caps.
    pub warning_level: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub warning_message: String,
}

impl UsageReport {
    pub fn usage_for(&self, kind: UsageKind) -> Option<&KindUsage> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}

/// Total usage across one calendar month. History reads return these rows
/// newest month first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    /// First day of the month.
    pub month: NaiveDate,
    pub checks: u64,
    pub registers: u64,
    pub party_checks: u64,
    pub party_registers: u64,
}

impl MonthlyUsage {
    pub fn empty(month: NaiveDate) -> Self {
        Self {
            month,
            checks: 0,
            registers: 0,
            party_checks: 0,
            party_registers: 0,
        }
    }
}

/// A threshold crossing that should be surfaced to the tenant, at most once
/// per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaWarning {
    /// 80 or 90.
    pub threshold: u8,
    pub period_start: DateTime<Utc>,
}

/// Warning bands, highest first. Mirrors the two notification thresholds.
pub(crate) const WARNING_THRESHOLDS: [u8; 2] = [90, 80];

pub(crate) fn warning_level(percent: f64) -> &'static str {
    if percent >= 90.0 {
        "critical"
    } else if percent >= 80.0 {
        "warning"
    } else {
        ""
    }
}

pub(crate) fn warning_message(level: &str) -> &'static str {
    match level {
        "critical" => "You are at 90% of your quota. Consider upgrading to avoid service interruption.",
        "warning" => "You are at 80% of your quota. Consider upgrading for higher limits.",
        _ => "",
    }
}
