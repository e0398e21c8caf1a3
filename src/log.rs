//! Logging shims over `tracing`.
//!
//! With the `tracing` feature disabled every macro expands to nothing, so the
//! solver carries no logging cost in minimal builds.

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)*);
        }
    };
}

macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!($($arg)*);
        }
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
