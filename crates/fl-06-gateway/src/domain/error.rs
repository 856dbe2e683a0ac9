//! Gateway error taxonomy and wire rejection payloads.

use chrono::{DateTime, Utc};
use fl_02_registry::StoreError;
use fl_03_match_engine::EngineError;
use fl_04_quota::QuotaError;
use fl_05_rate_limit::RateLimitError;
use serde::{Deserialize, Serialize};
use shared_types::{PeriodType, UsageKind};
use thiserror::Error;

/// Every way a tenant-facing operation can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("record not found")]
    NotFound,

    #[error("not permitted for this tenant")]
    Forbidden,

    #[error("unregister window has expired")]
    UnregisterWindowExpired,

    #[error("rate limit exceeded; retry in {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("{period} {kind} quota exceeded ({current_usage}/{limit})")]
    QuotaExceeded {
        kind: UsageKind,
        period: PeriodType,
        current_usage: u64,
        limit: u64,
        resets_at: DateTime<Utc>,
    },

    #[error("unknown or inactive tenant")]
    InvalidCredentials,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl GatewayError {
    /// Stable machine-readable code for the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::UnregisterWindowExpired => "unregister_window_expired",
            Self::RateLimitExceeded { .. } => "rate_limit_exceeded",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::InvalidCredentials => "invalid_credentials",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    pub fn to_rejection(&self) -> Rejection {
        let mut rejection = Rejection {
            error: self.code().to_string(),
            message: self.to_string(),
            retry_after_secs: None,
            quota_type: None,
            period_type: None,
            current_usage: None,
            limit: None,
            resets_at: None,
        };
        match self {
            Self::RateLimitExceeded { retry_after_secs } => {
                rejection.retry_after_secs = Some(*retry_after_secs);
            }
            Self::QuotaExceeded {
                kind,
                period,
                current_usage,
                limit,
                resets_at,
            } => {
                rejection.quota_type = Some(*kind);
                rejection.period_type = Some(*period);
                rejection.current_usage = Some(*current_usage);
                rejection.limit = Some(*limit);
                rejection.resets_at = Some(*resets_at);
            }
            _ => {}
        }
        rejection
    }
}

/// Serialized rejection body, shared by all transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_type: Option<UsageKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_type: Option<PeriodType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_usage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resets_at: Option<DateTime<Utc>>,
}

impl From<EngineError> for GatewayError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => Self::Validation(msg),
            EngineError::NotFound => Self::NotFound,
            EngineError::Forbidden => Self::Forbidden,
            EngineError::UnregisterWindowExpired => Self::UnregisterWindowExpired,
            EngineError::Store(err) => err.into(),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<QuotaError> for GatewayError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Exceeded {
                kind,
                period,
                current_usage,
                limit,
                resets_at,
            } => Self::QuotaExceeded {
                kind,
                period,
                current_usage,
                limit,
                resets_at,
            },
            QuotaError::Store(msg) => Self::StorageUnavailable(msg),
        }
    }
}

impl From<RateLimitError> for GatewayError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::Store(msg) => Self::StorageUnavailable(msg),
        }
    }
}
