//! Log record structure

use super::channel_mask::ChannelMask;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// One unit of log data travelling through the event bus.
///
/// Records are stamped when they are enqueued. The worker hands a copy to the
/// preprocessor, so the queued record itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub mask: ChannelMask,
    pub text: String,
}

impl Record {
    pub fn new(level: LogLevel, mask: ChannelMask, text: String) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            mask,
            text,
        }
    }
}
