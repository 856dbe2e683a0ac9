//! # FundLock Test Suite
//!
//! Unified test crate for cross-crate behavior:
//!
//! ```text
//! tests/src/integration/
//! ├── hashing.rs      # Fingerprint determinism and normalization vectors
//! ├── matching.rs     # Check/register/unregister semantics end to end
//! ├── concurrency.rs  # Race tests (N concurrent registers, one winner)
//! ├── quotas.rs       # Quota exhaustion, resets, warnings
//! └── pipeline.rs     # Full gateway admission pipeline
//! ```
//!
//! Single-crate behavior is tested in each crate's own `#[cfg(test)]`
//! modules; everything here deliberately crosses a crate boundary.
//!
//! ```bash
//! cargo test -p fl-tests
//! ```

pub mod integration;

/// Install a compact tracing subscriber honoring `RUST_LOG`. Safe to call
/// from every test; only the first call wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
