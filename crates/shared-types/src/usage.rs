//! Usage metering dimensions and the bounded/unbounded limit type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four metered operation kinds.
///
/// A closed set: adding a kind forces every match arm that maps kinds to
/// counters or limits to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    Check,
    Register,
    PartyCheck,
    PartyRegister,
}

impl UsageKind {
    pub const ALL: [UsageKind; 4] = [
        UsageKind::Check,
        UsageKind::Register,
        UsageKind::PartyCheck,
        UsageKind::PartyRegister,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Register => "register",
            Self::PartyCheck => "party_check",
            Self::PartyRegister => "party_register",
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accounting window granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Monthly,
}

impl PeriodType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier limit: either a hard cap or unbounded.
///
/// Unbounded never triggers rejection and reports 0% utilization; call sites
/// cannot accidentally compare usage against a sentinel integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    #[default]
    Unbounded,
    Bounded(u64),
}

impl Limit {
    /// Whether `usage` has reached or passed this limit.
    pub fn is_exhausted_by(self, usage: u64) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Bounded(cap) => usage >= cap,
        }
    }

    /// Utilization percentage; unbounded (and zero caps) report 0.
    pub fn percent_used(self, usage: u64) -> f64 {
        match self {
            Self::Unbounded | Self::Bounded(0) => 0.0,
            Self::Bounded(cap) => usage as f64 / cap as f64 * 100.0,
        }
    }

    /// The cap, if any. `None` means unbounded.
    pub fn cap(self) -> Option<u64> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(cap) => Some(cap),
        }
    }
}

impl From<Option<u64>> for Limit {
    fn from(value: Option<u64>) -> Self {
        match value {
            None => Self::Unbounded,
            Some(cap) => Self::Bounded(cap),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Wire format: null = unbounded, number = cap.
        self.cap().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.into())
    }
}
