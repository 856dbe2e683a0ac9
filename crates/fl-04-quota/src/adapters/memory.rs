//! In-memory usage store.
//!
//! Counters are keyed by period start date, so a period rollover needs no
//! sweep: the next increment simply lands on a fresh key. Counters from
//! ended periods are retained as the usage-history record; only spent
//! warning markers are reclaimed by `prune`.

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{period_key, FunderId, PeriodType, UsageKind};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::errors::QuotaError;
use crate::domain::report::MonthlyUsage;
use crate::ports::UsageStore;

type CounterKey = (FunderId, UsageKind, PeriodType, NaiveDate);
type WarningKey = (FunderId, u8, NaiveDate);

#[derive(Default)]
pub struct InMemoryUsageStore {
    counters: DashMap<CounterKey, u64>,
    warnings: DashMap<WarningKey, ()>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop warning markers from months that have ended. Usage counters are
    /// never deleted; past periods back the history reads.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let month = period_key(PeriodType::Monthly, now);
        let before = self.warnings.len();
        self.warnings.retain(|(_, _, start), _| *start >= month);
        let removed = before - self.warnings.len();
        if removed > 0 {
            debug!(removed, "pruned spent warning markers");
        }
        removed
    }
}

impl UsageStore for InMemoryUsageStore {
    fn usage(
        &self,
        funder: FunderId,
        kind: UsageKind,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaError> {
        let key = (funder, kind, period, period_key(period, now));
        Ok(self.counters.get(&key).map(|c| *c).unwrap_or(0))
    }

    fn increment(
        &self,
        funder: FunderId,
        kind: UsageKind,
        period: PeriodType,
        now: DateTime<Utc>,
    ) -> Result<u64, QuotaError> {
        let key = (funder, kind, period, period_key(period, now));
        let mut counter = self.counters.entry(key).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    fn history(&self, funder: FunderId, months: usize) -> Result<Vec<MonthlyUsage>, QuotaError> {
        let mut by_month: BTreeMap<NaiveDate, MonthlyUsage> = BTreeMap::new();
        for entry in self.counters.iter() {
            let (owner, kind, period, start) = *entry.key();
            if owner != funder || period != PeriodType::Monthly {
                continue;
            }
            let row = by_month
                .entry(start)
                .or_insert_with(|| MonthlyUsage::empty(start));
            let total = match kind {
                UsageKind::Check => &mut row.checks,
                UsageKind::Register => &mut row.registers,
                UsageKind::PartyCheck => &mut row.party_checks,
                UsageKind::PartyRegister => &mut row.party_registers,
            };
            *total += *entry.value();
        }
        Ok(by_month.into_values().rev().take(months).collect())
    }

    fn mark_warning_sent(
        &self,
        funder: FunderId,
        threshold: u8,
        now: DateTime<Utc>,
    ) -> Result<bool, QuotaError> {
        let key = (funder, threshold, period_key(PeriodType::Monthly, now));
        match self.warnings.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(true)
            }
        }
    }
}
