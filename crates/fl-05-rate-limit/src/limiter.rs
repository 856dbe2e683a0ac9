//! Check-then-increment rate limiting.

use chrono::{DateTime, Utc};
use shared_types::{day_end, month_end, FunderId, Limit, PeriodType};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{RateLimitDecision, RateLimitError};
use crate::ports::CounterStore;

pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    /// Admit or deny one request, counting it only on admission.
    ///
    /// The daily window is tested before the monthly one; a denial reports
    /// how long until the violated window reopens.
    pub fn check_and_increment(
        &self,
        funder: FunderId,
        daily_limit: Limit,
        monthly_limit: Limit,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let daily_used = self.store.count(funder, PeriodType::Daily, now)?;
        let monthly_used = self.store.count(funder, PeriodType::Monthly, now)?;

        let mut decision = RateLimitDecision {
            allowed: false,
            daily_used,
            daily_limit,
            monthly_used,
            monthly_limit,
            retry_after_secs: None,
        };

        if daily_limit.is_exhausted_by(daily_used) {
            decision.retry_after_secs = Some(seconds_until(day_end(now), now));
            debug!(daily_used, "daily rate limit hit");
            return Ok(decision);
        }
        if monthly_limit.is_exhausted_by(monthly_used) {
            decision.retry_after_secs = Some(seconds_until(month_end(now), now));
            debug!(monthly_used, "monthly rate limit hit");
            return Ok(decision);
        }

        decision.daily_used = self.store.increment(funder, PeriodType::Daily, now)?;
        decision.monthly_used = self.store.increment(funder, PeriodType::Monthly, now)?;
        decision.allowed = true;
        Ok(decision)
    }

    /// Current window counts without admitting anything.
    pub fn usage(
        &self,
        funder: FunderId,
        now: DateTime<Utc>,
    ) -> Result<(u64, u64), RateLimitError> {
        Ok((
            self.store.count(funder, PeriodType::Daily, now)?,
            self.store.count(funder, PeriodType::Monthly, now)?,
        ))
    }
}

fn seconds_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (deadline - now).num_seconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCounterStore;
    use chrono::{Duration, TimeZone};

    fn limiter() -> RateLimiter {
        RateLimiter::new(Arc::new(InMemoryCounterStore::new()))
    }

    #[test]
    fn admits_until_the_daily_cap() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc::now();

        for i in 1..=3 {
            let decision = limiter
                .check_and_increment(funder, Limit::Bounded(3), Limit::Unbounded, now)
                .unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.daily_used, i);
        }
        let denied = limiter
            .check_and_increment(funder, Limit::Bounded(3), Limit::Unbounded, now)
            .unwrap();
        assert!(denied.is_denied());
        assert!(denied.retry_after_secs.is_some());
    }

    #[test]
    fn denied_requests_are_not_counted() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc::now();
        limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, now)
            .unwrap();
        limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, now)
            .unwrap();
        assert_eq!(limiter.usage(funder, now).unwrap(), (1, 1));
    }

    #[test]
    fn daily_denial_points_at_midnight() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 23, 0, 0).unwrap();
        limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, now)
            .unwrap();
        let denied = limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, now)
            .unwrap();
        assert_eq!(denied.retry_after_secs, Some(3_600));
    }

    #[test]
    fn monthly_denial_points_at_the_next_month() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 0).unwrap();
        limiter
            .check_and_increment(funder, Limit::Bounded(10), Limit::Bounded(1), now)
            .unwrap();
        let denied = limiter
            .check_and_increment(funder, Limit::Bounded(10), Limit::Bounded(1), now)
            .unwrap();
        assert_eq!(denied.retry_after_secs, Some(60));
    }

    #[test]
    fn windows_reopen_naturally() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc::now();
        limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, now)
            .unwrap();
        let tomorrow = now + Duration::days(1);
        let decision = limiter
            .check_and_increment(funder, Limit::Bounded(1), Limit::Unbounded, tomorrow)
            .unwrap();
        assert!(decision.allowed);
    }

    #[test]
    fn unbounded_limits_never_deny() {
        let limiter = limiter();
        let funder = FunderId::generate();
        let now = Utc::now();
        for _ in 0..1_000 {
            let decision = limiter
                .check_and_increment(funder, Limit::Unbounded, Limit::Unbounded, now)
                .unwrap();
            assert!(decision.allowed);
        }
    }
}
