pub mod log_sink;
pub mod memory;
