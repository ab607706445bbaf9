//! Core engine types

pub mod channel_mask;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_bus;
pub mod formatter;
pub mod log_level;
pub mod metrics;
pub mod record;
pub mod session;
pub mod signature;
pub mod thread_names;
pub mod timestamp;
pub mod worker;

pub use channel_mask::{ChannelId, ChannelMask, CHANNEL_CAPACITY};
pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder, EngineState};
pub use error::{LoggerError, Result};
pub use event_bus::EventBus;
pub use formatter::{default_formatter, FormatInfo, FormatSettings, Formatter};
pub use log_level::LogLevel;
pub use metrics::EngineMetrics;
pub use record::Record;
pub use session::Session;
pub use signature::Signature;
pub use thread_names::ThreadNames;
pub use timestamp::TimestampStyle;
pub use worker::{Preprocessor, WORKER_THREAD_NAME};
