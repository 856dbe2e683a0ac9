//! Match engine domain layer.

pub mod errors;
pub mod responses;
