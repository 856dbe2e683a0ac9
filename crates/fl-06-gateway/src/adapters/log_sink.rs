//! Notification sink that only logs.
//!
//! Stands in for the email/webhook channels when none is wired up, and
//! doubles as the default sink in tests.

use async_trait::async_trait;
use fl_04_quota::QuotaWarning;
use shared_types::FunderId;
use tracing::info;

use crate::ports::{NotificationSink, SinkError};

#[derive(Debug, Default)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn send_usage_warning(
        &self,
        funder: FunderId,
        warning: QuotaWarning,
    ) -> Result<(), SinkError> {
        info!(
            funder = %funder.0,
            threshold = warning.threshold,
            "usage threshold warning"
        );
        Ok(())
    }
}
