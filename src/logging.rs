//! Feature-gated logging macros used inside the library.
//!
//! With the `logging` feature enabled these forward to `tracing`; without it
//! they expand to nothing, so fixture lookups carry no logging cost in test
//! binaries that do not install a subscriber.
//!
//! ```rust,ignore
//! use crate::logging::{debug, trace};
//!
//! trace!(path = %path.display(), "reading record");
//! debug!(fingerprint = %key, status, "record loaded");
//! ```

/// Per-lookup detail (paths touched, cache hits).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Lookup outcomes and store lifecycle.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Summaries of whole-directory operations.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Fixture layout problems that are skipped rather than returned.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
