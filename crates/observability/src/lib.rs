//! Tracing/logging setup shared by host processes.
//!
//! The derivation crates only *emit* via `tracing`; wiring a subscriber is
//! the embedding process's job, and this crate is that one seam.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
