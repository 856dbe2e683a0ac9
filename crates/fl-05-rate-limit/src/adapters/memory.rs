//! In-memory rate counter store.

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use shared_types::{period_key, FunderId, PeriodType};
use tracing::debug;

use crate::domain::RateLimitError;
use crate::ports::CounterStore;

type Key = (FunderId, PeriodType, NaiveDate);

#[derive(Default)]
pub struct InMemoryCounterStore {
    counters: DashMap<Key, u64>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop counters whose window ended before `now`.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let day = period_key(PeriodType::Daily, now);
        let month = period_key(PeriodType::Monthly, now);
        let before = self.counters.len();
        self.counters.retain(|(_, period, start), _| match period {
            PeriodType::Daily => *start >= day,
            PeriodType::Monthly => *start >= month,
        });
        let removed = before - self.counters.len();
        if removed > 0 {
            debug!(removed, "pruned expired rate windows");
        }
        removed
    }
}

impl CounterStore for InMemoryCounterStore {
    fn count(
        &self,
        funder: FunderId,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError> {
        let key = (funder, period, period_key(period, now));
        Ok(self.counters.get(&key).map(|c| *c).unwrap_or(0))
    }

    fn increment(
        &self,
        funder: FunderId,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError> {
        let key = (funder, period, period_key(period, now));
        let mut counter = self.counters.entry(key).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}
