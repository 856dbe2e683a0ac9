//! # Shared Types Crate
//!
//! Cross-subsystem domain primitives for the FundLock registry.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, disclosure levels, usage
//!   dimensions, and calendar-period arithmetic are defined once here and
//!   consumed by every subsystem crate.
//! - **No sentinel values**: "unlimited" is the [`Limit::Unbounded`] variant,
//!   never a magic integer; disclosure levels are a closed enum, never raw
//!   strings.
//! - **UTC everywhere**: all period boundaries (daily midnight, first of
//!   month) are computed on the UTC calendar.

pub mod entities;
pub mod errors;
pub mod period;
pub mod usage;

pub use entities::*;
pub use errors::*;
pub use period::*;
pub use usage::*;
