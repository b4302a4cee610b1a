//! Zero-cost tracing helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing`
//! crate. Without it they expand to nothing, so the tree engine pays no cost
//! for its instrumentation points.
//!
//! ```bash
//! # Run the cursor tests with rebalancing events printed
//! RUST_LOG=indexed_tree_list=trace cargo test --features tracing cursor
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level logging. Compiles to a no-op without the `tracing` feature.
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

/// Debug-level logging. Compiles to a no-op without the `tracing` feature.
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
