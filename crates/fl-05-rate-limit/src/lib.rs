//! # Rate Limit Subsystem
//!
//! Coarse per-tenant request throttling, upstream of quota accounting.
//!
//! Each tenant gets one daily and one monthly request counter, keyed by the
//! period's start date; counters reset implicitly when the period rolls
//! over. A denied request is not counted, and the denial carries the number
//! of seconds until the violated window reopens.

pub mod adapters;
pub mod domain;
pub mod limiter;
pub mod ports;

pub use adapters::memory::InMemoryCounterStore;
pub use domain::{RateLimitDecision, RateLimitError};
pub use limiter::RateLimiter;
pub use ports::CounterStore;
