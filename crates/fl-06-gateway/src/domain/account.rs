//! Tenant accounts as the gateway sees them.

use serde::{Deserialize, Serialize};
use shared_types::{FunderId, Limit};

/// A resolved tenant identity with everything admission needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunderAccount {
    pub id: FunderId,
    pub name: String,
    /// Subscription plan name; resolved against the built-in tier table,
    /// falling back to the configured default when unknown.
    pub tier_name: String,
    /// Raw request throttle, independent of per-operation quotas.
    pub daily_request_limit: Limit,
    pub monthly_request_limit: Limit,
    /// Whether operations store this tenant's identity unless the call says
    /// otherwise.
    pub track_attribution: bool,
    pub active: bool,
}

impl FunderAccount {
    pub fn new(id: FunderId, name: impl Into<String>, tier_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tier_name: tier_name.into(),
            daily_request_limit: Limit::Bounded(1_000),
            monthly_request_limit: Limit::Bounded(20_000),
            track_attribution: false,
            active: true,
        }
    }

    pub fn with_request_limits(mut self, daily: Limit, monthly: Limit) -> Self {
        self.daily_request_limit = daily;
        self.monthly_request_limit = monthly;
        self
    }

    pub fn with_attribution(mut self, track: bool) -> Self {
        self.track_attribution = track;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}
