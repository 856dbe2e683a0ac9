//! Quota exhaustion, period resets and warning dispatch.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use fl_04_quota::{
        InMemoryUsageStore, PeriodLimits, QuotaError, QuotaTracker, SubscriptionTier, TierLimits,
    };
    use shared_types::{FunderId, Limit, PeriodType, UsageKind};
    use std::sync::Arc;

    fn five_a_day() -> SubscriptionTier {
        SubscriptionTier::new(
            "five",
            "Five",
            TierLimits {
                check: PeriodLimits::bounded(5, 1_000),
                register: PeriodLimits::bounded(5, 1_000),
                party_query: PeriodLimits::daily_only(5),
            },
            90,
            true,
        )
    }

    #[test]
    fn five_per_day_blocks_the_sixth_and_resets_next_day() {
        let tracker = QuotaTracker::new(Arc::new(InMemoryUsageStore::new()));
        let tier = five_a_day();
        let funder = FunderId::generate();
        let now = Utc::now();

        for _ in 0..5 {
            tracker.check(funder, &tier, UsageKind::Register, now).unwrap();
            tracker.record(funder, UsageKind::Register, now).unwrap();
        }
        let err = tracker
            .check(funder, &tier, UsageKind::Register, now)
            .unwrap_err();
        assert!(matches!(
            err,
            QuotaError::Exceeded {
                kind: UsageKind::Register,
                period: PeriodType::Daily,
                current_usage: 5,
                limit: 5,
                ..
            }
        ));

        // The daily window reopens tomorrow; monthly headroom remains.
        let tomorrow = now + Duration::days(1);
        assert!(tracker.check(funder, &tier, UsageKind::Register, tomorrow).is_ok());
    }

    #[test]
    fn breach_reset_time_is_the_period_boundary() {
        let tracker = QuotaTracker::new(Arc::new(InMemoryUsageStore::new()));
        let tier = five_a_day();
        let funder = FunderId::generate();
        let now = Utc::now();
        for _ in 0..5 {
            tracker.record(funder, UsageKind::Check, now).unwrap();
        }
        let QuotaError::Exceeded { resets_at, .. } =
            tracker.check(funder, &tier, UsageKind::Check, now).unwrap_err()
        else {
            panic!("expected a quota breach");
        };
        assert!(resets_at > now);
        assert!(resets_at - now <= Duration::days(1));
    }

    #[test]
    fn unbounded_tier_reports_zero_percent_forever() {
        let tracker = QuotaTracker::new(Arc::new(InMemoryUsageStore::new()));
        let tier = SubscriptionTier::enterprise();
        let funder = FunderId::generate();
        let now = Utc::now();
        for _ in 0..500 {
            tracker.record(funder, UsageKind::Check, now).unwrap();
        }
        let report = tracker.report(funder, &tier, now).unwrap();
        let check = report.usage_for(UsageKind::Check).unwrap();
        assert_eq!(check.daily.used, 500);
        assert_eq!(check.daily.limit, Limit::Unbounded);
        assert_eq!(check.daily.percent, 0.0);
        assert_eq!(report.warning_level, "");
    }

    #[test]
    fn history_outlives_the_period_sweep() {
        let store = Arc::new(InMemoryUsageStore::new());
        let tracker = QuotaTracker::new(store.clone());
        let funder = FunderId::generate();
        let last_month = Utc::now() - Duration::days(45);

        for _ in 0..4 {
            tracker.record(funder, UsageKind::Check, last_month).unwrap();
        }
        tracker.record(funder, UsageKind::PartyCheck, last_month).unwrap();

        // The sweep reclaims warning markers; usage stays on record.
        store.prune(Utc::now());
        let history = tracker.history(funder, 12).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].checks, 4);
        assert_eq!(history[0].party_checks, 1);
    }

    #[test]
    fn warning_markers_reset_with_the_month() {
        let tracker = QuotaTracker::new(Arc::new(InMemoryUsageStore::new()));
        let tier = five_a_day();
        let funder = FunderId::generate();
        let now = Utc::now();
        for _ in 0..5 {
            tracker.record(funder, UsageKind::Check, now).unwrap();
        }
        assert!(tracker.pending_warning(funder, &tier, now).unwrap().is_some());
        assert!(tracker.pending_warning(funder, &tier, now).unwrap().is_none());

        // Next month: counters are fresh, so no warning fires, but the
        // markers are also fresh for when usage climbs again.
        let next_month = now + Duration::days(32);
        assert!(tracker
            .pending_warning(funder, &tier, next_month)
            .unwrap()
            .is_none());
        for _ in 0..5 {
            tracker.record(funder, UsageKind::Check, next_month).unwrap();
        }
        assert!(tracker
            .pending_warning(funder, &tier, next_month)
            .unwrap()
            .is_some());
    }
}
