//! Shared macros for the codebase
//!
//! Per-edge resolution tracing is far too chatty for normal runs, so it is
//! compiled out unless the `trace` feature is enabled.

/// Trace a single resolution step - no-op when trace feature is disabled
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_edge {
    ($($arg:tt)*) => {};
}

/// Trace a single resolution step
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_edge {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}
