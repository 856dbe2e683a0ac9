//! Outbound ports for the gateway.

use async_trait::async_trait;
use fl_04_quota::QuotaWarning;
use shared_types::FunderId;
use thiserror::Error;

use crate::domain::account::FunderAccount;
use crate::domain::error::GatewayError;

/// Resolves validated tenant identities to accounts.
///
/// Authentication itself (API keys, OAuth) lives in front of the gateway;
/// by the time an id reaches the directory it is already proven.
pub trait FunderDirectory: Send + Sync {
    fn find(&self, id: FunderId) -> Result<Option<FunderAccount>, GatewayError>;
}

#[derive(Debug, Clone, Error)]
#[error("notification delivery failed: {0}")]
pub struct SinkError(pub String);

/// Delivery channel for usage threshold warnings.
///
/// Called from a background task; implementations may be slow without
/// holding up any request, and failures are logged rather than retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send_usage_warning(
        &self,
        funder: FunderId,
        warning: QuotaWarning,
    ) -> Result<(), SinkError>;
}
