//! Zero-cost logging shims.
//!
//! With the `tracing` feature enabled these macros forward to the
//! `tracing` crate; without it (the default) they expand to nothing, so
//! hot paths pay no cost for the call sites sprinkled through split,
//! merge, and queue-retirement code.
//!
//! ```bash
//! # Normal build - no logging overhead
//! cargo build --release
//!
//! # Run a test with structural events visible
//! RUST_LOG=grove=trace cargo test --features tracing scenario
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level structural events (most verbose).
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level structural events (root growth/collapse, retirement flushes).
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
