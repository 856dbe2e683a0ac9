//! # Quota Subsystem
//!
//! Subscription tiers and per-tenant usage accounting for the billable
//! operations (checks, registers, party checks, party registers).
//!
//! Enforcement order is fixed: for each operation the daily limit is tested
//! before the monthly one, so the error a tenant sees always names the
//! sooner-resetting period. A breached call still has its usage recorded
//! before the rejection is returned, keeping the counters an honest record
//! of attempts.
//!
//! Threshold warnings (90% then 80% of a limit) fire at most once per
//! tenant, operation, period and threshold; the marker resets naturally when
//! the period rolls over.
//!
//! Usage counters are append-only: past periods are retained as the audit
//! record and surface as per-month history rows.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod tracker;

pub use adapters::memory::InMemoryUsageStore;
pub use domain::errors::QuotaError;
pub use domain::report::{KindUsage, MonthlyUsage, PeriodUsage, QuotaWarning, UsageReport};
pub use domain::tiers::{PeriodLimits, SubscriptionTier, TierLimits};
pub use ports::UsageStore;
pub use tracker::QuotaTracker;
