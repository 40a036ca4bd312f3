//! Shared test setup.
//!
//! `init_tracing` installs a console subscriber once per process so a
//! failing test can be rerun with structural events visible:
//!
//! ```bash
//! RUST_LOG=grove=trace cargo test --features tracing scenario -- --nocapture
//! ```
//!
//! Without the `tracing` feature the library emits nothing and this
//! setup is a no-op beyond installing the (idle) subscriber.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the test subscriber. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic xorshift generator for stress patterns. Seeded per
/// test so failures reproduce exactly.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}
