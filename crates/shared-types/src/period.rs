//! Calendar-period arithmetic on the UTC calendar.
//!
//! Daily windows run midnight-to-midnight UTC; monthly windows run from the
//! first of the month to the first of the next month.

use crate::usage::PeriodType;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Start of the UTC day containing `now`.
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Start of the next UTC day (when daily counters reset).
pub fn day_end(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) + Duration::days(1)
}

/// First day of the month containing `date`.
pub fn month_first_day(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month_first_day(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Start of the UTC month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    month_first_day(now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Start of the next UTC month (when monthly counters reset).
pub fn month_end(now: DateTime<Utc>) -> DateTime<Utc> {
    next_month_first_day(now.date_naive())
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// `(period_start, period_end)` for the window of `period` containing `now`.
pub fn period_bounds(period: PeriodType, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    match period {
        PeriodType::Daily => (day_start(now), day_end(now)),
        PeriodType::Monthly => (month_start(now), month_end(now)),
    }
}

/// Canonical key date for the window of `period` containing `now`.
///
/// Two instants fall in the same window iff their key dates are equal.
pub fn period_key(period: PeriodType, now: DateTime<Utc>) -> NaiveDate {
    match period {
        PeriodType::Daily => now.date_naive(),
        PeriodType::Monthly => month_first_day(now.date_naive()),
    }
}
