//! # Threaded Logger
//!
//! An asynchronous, multi-channel logging engine. Any number of threads
//! build leveled, named records without touching I/O; a single background
//! worker delivers them, in order, to a fixed table of output channels.
//!
//! ## Features
//!
//! - **Non-blocking producers**: callers only take the event bus lock to enqueue
//! - **Channels**: standard output, append-only files and application-owned streams
//! - **Signatures**: named logger handles with their own channel selection
//! - **Preprocessors**: terminal coloring that never leaks into log files
//!
//! ```
//! use threaded_logger::prelude::*;
//!
//! let engine = Engine::builder().filter_level(LogLevel::Info).stdout(false).build();
//! let app = engine.signature("app");
//! app.info().append("started with ").append(4).append(" workers");
//! engine.shutdown();
//! ```

pub mod channels;
pub mod core;
pub mod macros;
pub mod preprocessors;

pub mod prelude {
    pub use crate::channels::{shared_stream, ChannelKind, SharedStream};
    pub use crate::core::{
        ChannelId, ChannelMask, Engine, EngineBuilder, EngineConfig, EngineMetrics, EngineState,
        FormatInfo, FormatSettings, Formatter, LogLevel, LoggerError, Preprocessor, Record, Result,
        Session, Signature, TimestampStyle, CHANNEL_CAPACITY,
    };
    pub use crate::preprocessors::marker_preprocessor;
    #[cfg(feature = "color")]
    pub use crate::preprocessors::{color_preprocessor, ColorScheme};
}

pub use crate::channels::{shared_stream, ChannelKind, SharedStream};
pub use crate::core::{
    ChannelId, ChannelMask, Engine, EngineBuilder, EngineConfig, EngineMetrics, EngineState,
    FormatInfo, FormatSettings, Formatter, LogLevel, LoggerError, Preprocessor, Record, Result,
    Session, Signature, TimestampStyle, CHANNEL_CAPACITY,
};
