//! Registry domain layer.

pub mod entities;
pub mod errors;
