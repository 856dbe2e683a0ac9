//! Rate limit decisions and errors.

use serde::{Deserialize, Serialize};
use shared_types::Limit;
use thiserror::Error;

/// Outcome of a rate limit probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub daily_used: u64,
    pub daily_limit: Limit,
    pub monthly_used: u64,
    pub monthly_limit: Limit,
    /// Seconds until the violated window reopens. Only set on denial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimitError {
    #[error("rate counter store unavailable: {0}")]
    Store(String),
}
