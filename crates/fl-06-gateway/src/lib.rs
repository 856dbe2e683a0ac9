//! # Gateway Subsystem
//!
//! Transport-agnostic facade over the registry: every tenant-facing
//! operation enters through [`RegistryService`], which runs the admission
//! pipeline before touching the match engine:
//!
//! ```text
//! resolve funder -> rate limiter -> quota check -> record usage
//!                -> engine operation -> warning dispatch (background)
//! ```
//!
//! A quota breach still records the attempted usage before the rejection is
//! returned, so counters reflect demand. Threshold-warning delivery runs on
//! a spawned task; sink failures are logged and swallowed, never surfaced to
//! the caller.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::log_sink::LogNotificationSink;
pub use adapters::memory::InMemoryFunderDirectory;
pub use domain::account::FunderAccount;
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{GatewayError, Rejection};
pub use ports::{FunderDirectory, NotificationSink, SinkError};
pub use service::{RegisterRequest, RegistryService, TenantUsage};
