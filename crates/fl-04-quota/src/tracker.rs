//! Quota checking, usage recording and threshold warnings.

use chrono::{DateTime, Utc};
use shared_types::{period_bounds, FunderId, Limit, PeriodType, UsageKind};
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::QuotaError;
use crate::domain::report::{
    warning_level, warning_message, KindUsage, MonthlyUsage, PeriodUsage, QuotaWarning,
    UsageReport, WARNING_THRESHOLDS,
};
use crate::domain::tiers::SubscriptionTier;
use crate::ports::UsageStore;

pub struct QuotaTracker {
    store: Arc<dyn UsageStore>,
}

impl QuotaTracker {
    pub fn new(store: Arc<dyn UsageStore>) -> Self {
        Self { store }
    }

    /// Test whether one more `kind` operation fits under the tier's caps.
    ///
    /// The daily cap is tested before the monthly one. Does not move any
    /// counter; pair with [`record`](Self::record).
    pub fn check(
        &self,
        funder: FunderId,
        tier: &SubscriptionTier,
        kind: UsageKind,
        now: DateTime<Utc>,
    ) -> Result<(), QuotaError> {
        for period in [PeriodType::Daily, PeriodType::Monthly] {
            let limit = tier.limits.limit(kind, period);
            let Limit::Bounded(cap) = limit else {
                continue;
            };
            let used = self.store.usage(funder, kind, period, now)?;
            if limit.is_exhausted_by(used) {
                let (_, resets_at) = period_bounds(period, now);
                return Err(QuotaError::Exceeded {
                    kind,
                    period,
                    current_usage: used,
                    limit: cap,
                    resets_at,
                });
            }
        }
        Ok(())
    }

    /// Count one `kind` operation in both the daily and the monthly period.
    ///
    /// Called on every attempt, including ones rejected over quota, so the
    /// counters reflect demand rather than just admitted traffic.
    pub fn record(
        &self,
        funder: FunderId,
        kind: UsageKind,
        now: DateTime<Utc>,
    ) -> Result<(), QuotaError> {
        self.store.increment(funder, kind, PeriodType::Daily, now)?;
        self.store.increment(funder, kind, PeriodType::Monthly, now)?;
        Ok(())
    }

    /// Full usage picture for one tenant against their tier.
    pub fn report(
        &self,
        funder: FunderId,
        tier: &SubscriptionTier,
        now: DateTime<Utc>,
    ) -> Result<UsageReport, QuotaError> {
        let mut kinds = Vec::with_capacity(UsageKind::ALL.len());
        for kind in UsageKind::ALL {
            kinds.push(KindUsage {
                kind,
                daily: self.period_usage(funder, tier, kind, PeriodType::Daily, now)?,
                monthly: self.period_usage(funder, tier, kind, PeriodType::Monthly, now)?,
            });
        }

        let level = warning_level(max_document_percent(&kinds));
        Ok(UsageReport {
            tier_name: tier.name.clone(),
            kinds,
            warning_level: level.to_string(),
            warning_message: warning_message(level).to_string(),
        })
    }

    /// Aggregated monthly usage, newest month first, at most `months` rows.
    pub fn history(
        &self,
        funder: FunderId,
        months: usize,
    ) -> Result<Vec<MonthlyUsage>, QuotaError> {
        self.store.history(funder, months)
    }

    /// Decide whether a threshold warning is due, claiming the send marker.
    ///
    /// The 90% band is tested before the 80% one, and each fires at most
    /// once per calendar month. Returns the warning this caller should
    /// deliver, if any.
    pub fn pending_warning(
        &self,
        funder: FunderId,
        tier: &SubscriptionTier,
        now: DateTime<Utc>,
    ) -> Result<Option<QuotaWarning>, QuotaError> {
        let report = self.report(funder, tier, now)?;
        let percent = max_document_percent(&report.kinds);
        let (period_start, _) = period_bounds(PeriodType::Monthly, now);

        for threshold in WARNING_THRESHOLDS {
            if percent < f64::from(threshold) {
                continue;
            }
            if self.store.mark_warning_sent(funder, threshold, now)? {
                debug!(threshold, percent, "usage warning due");
                return Ok(Some(QuotaWarning {
                    threshold,
                    period_start,
                }));
            }
            // Already sent at this band; a lower band would be stale news.
            return Ok(None);
        }
        Ok(None)
    }

    fn period_usage(
        &self,
        funder: FunderId,
        tier: &SubscriptionTier,
        kind: UsageKind,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<PeriodUsage, QuotaError> {
        let used = self.store.usage(funder, kind, period, now)?;
        let limit = tier.limits.limit(kind, period);
        let (_, resets_at) = period_bounds(period, now);
        Ok(PeriodUsage {
            used,
            limit,
            percent: limit.percent_used(used),
            resets_at,
        })
    }
}

/// Highest consumption percentage across the document-operation caps.
/// Party-query usage is excluded from warning math, matching the caps that
/// warnings are about.
fn max_document_percent(kinds: &[KindUsage]) -> f64 {
    kinds
        .iter()
        .filter(|k| matches!(k.kind, UsageKind::Check | UsageKind::Register))
        .flat_map(|k| [k.daily.percent, k.monthly.percent])
        .fold(0.0, f64::max)
}
