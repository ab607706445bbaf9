//! Logging macros for ergonomic message formatting.
//!
//! Each macro opens a session on a [`Signature`](crate::Signature), appends
//! the formatted message and commits it, evaluating to whether a record was
//! enqueued.
//!
//! # Examples
//!
//! ```
//! use threaded_logger::prelude::*;
//! use threaded_logger::info;
//!
//! let engine = Engine::builder().stdout(false).build();
//! let server = engine.signature("server");
//!
//! info!(server, "Server started");
//!
//! let port = 8080;
//! info!(server, "Server listening on port {}", port);
//! # engine.shutdown();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use threaded_logger::prelude::*;
/// # let engine = Engine::builder().stdout(false).build();
/// # let signature = engine.signature("doc");
/// use threaded_logger::log;
/// log!(signature, LogLevel::Info, "Simple message");
/// log!(signature, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($signature:expr, $level:expr, $($arg:tt)+) => {
        $signature.session($level).append(format_args!($($arg)+)).commit()
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($signature:expr, $($arg:tt)+) => {
        $crate::log!($signature, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($signature:expr, $($arg:tt)+) => {
        $crate::log!($signature, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use threaded_logger::prelude::*;
/// # let engine = Engine::builder().stdout(false).build();
/// # let signature = engine.signature("doc");
/// use threaded_logger::warn;
/// warn!(signature, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($signature:expr, $($arg:tt)+) => {
        $crate::log!($signature, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($signature:expr, $($arg:tt)+) => {
        $crate::log!($signature, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($signature:expr, $($arg:tt)+) => {
        $crate::log!($signature, $crate::LogLevel::Fatal, $($arg)+)
    };
}
