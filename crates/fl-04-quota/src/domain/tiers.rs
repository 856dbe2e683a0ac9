//! Subscription tiers and their operation limits.

use serde::{Deserialize, Serialize};
use shared_types::{Limit, PeriodType, UsageKind};

/// Daily and monthly caps for one operation family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodLimits {
    pub daily: Limit,
    pub monthly: Limit,
}

impl PeriodLimits {
    pub const UNBOUNDED: Self = Self {
        daily: Limit::Unbounded,
        monthly: Limit::Unbounded,
    };

    pub const fn bounded(daily: u64, monthly: u64) -> Self {
        Self {
            daily: Limit::Bounded(daily),
            monthly: Limit::Bounded(monthly),
        }
    }

    /// Daily cap only; the monthly axis is left open.
    pub const fn daily_only(daily: u64) -> Self {
        Self {
            daily: Limit::Bounded(daily),
            monthly: Limit::Unbounded,
        }
    }

    pub fn limit(&self, period: PeriodType) -> Limit {
        match period {
            PeriodType::Daily => self.daily,
            PeriodType::Monthly => self.monthly,
        }
    }
}

/// Caps for all billable operation families.
///
/// Party checks and party registers share one pool of daily party queries
/// and carry no monthly cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierLimits {
    pub check: PeriodLimits,
    pub register: PeriodLimits,
    pub party_query: PeriodLimits,
}

impl TierLimits {
    pub fn limit(&self, kind: UsageKind, period: PeriodType) -> Limit {
        match kind {
            UsageKind::Check => self.check.limit(period),
            UsageKind::Register => self.register.limit(period),
            UsageKind::PartyCheck | UsageKind::PartyRegister => self.party_query.limit(period),
        }
    }
}

/// A named subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionTier {
    pub name: String,
    pub display_name: String,
    pub limits: TierLimits,
    /// Ceiling on party history lookback, in days.
    pub party_lookback_days: u32,
    pub notifications_enabled: bool,
}

impl SubscriptionTier {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        limits: TierLimits,
        party_lookback_days: u32,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            limits,
            party_lookback_days,
            notifications_enabled,
        }
    }

    /// The plan tenants land on when none is assigned.
    pub fn free() -> Self {
        Self::new(
            "free",
            "Free",
            TierLimits {
                check: PeriodLimits::bounded(100, 2_000),
                register: PeriodLimits::bounded(50, 1_000),
                party_query: PeriodLimits::daily_only(20),
            },
            90,
            false,
        )
    }

    pub fn starter() -> Self {
        Self::new(
            "starter",
            "Starter",
            TierLimits {
                check: PeriodLimits::bounded(500, 10_000),
                register: PeriodLimits::bounded(250, 5_000),
                party_query: PeriodLimits::daily_only(100),
            },
            180,
            true,
        )
    }

    pub fn business() -> Self {
        Self::new(
            "business",
            "Business",
            TierLimits {
                check: PeriodLimits::bounded(2_000, 50_000),
                register: PeriodLimits::bounded(1_000, 25_000),
                party_query: PeriodLimits::daily_only(500),
            },
            365,
            true,
        )
    }

    pub fn enterprise() -> Self {
        Self::new(
            "enterprise",
            "Enterprise",
            TierLimits {
                check: PeriodLimits::UNBOUNDED,
                register: PeriodLimits::UNBOUNDED,
                party_query: PeriodLimits::UNBOUNDED,
            },
            730,
            true,
        )
    }

    /// All built-in plans, cheapest first.
    pub fn builtin() -> Vec<Self> {
        vec![Self::free(), Self::starter(), Self::business(), Self::enterprise()]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "free" => Some(Self::free()),
            "starter" => Some(Self::starter()),
            "business" => Some(Self::business()),
            "enterprise" => Some(Self::enterprise()),
            _ => None,
        }
    }
}
