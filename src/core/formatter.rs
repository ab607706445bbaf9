//! Line prefix formatting
//!
//! A formatter renders the text placed in front of the message of every
//! session: by default `[INFO] [tag] `. Signatures snapshot the formatter
//! installed when they are created.

use super::channel_mask::ChannelMask;
use super::log_level::LogLevel;
use std::sync::Arc;
use std::thread::ThreadId;

/// Per-signature inputs to a formatter
#[derive(Debug, Clone, Copy)]
pub struct FormatSettings<'a> {
    pub signature: &'a str,
    pub channels: ChannelMask,
}

/// Per-session inputs to a formatter, gathered on the calling thread
#[derive(Debug, Clone, Copy)]
pub struct FormatInfo<'a> {
    pub level: LogLevel,
    pub thread_label: Option<&'a str>,
    pub thread_id: ThreadId,
}

pub type Formatter = Arc<dyn Fn(&FormatSettings<'_>, &FormatInfo<'_>) -> String + Send + Sync>;

/// `<label> [<tag>] `, tagged with the claimed thread name when there is
/// one and the signature name otherwise
pub fn default_prefix(settings: &FormatSettings<'_>, info: &FormatInfo<'_>) -> String {
    let tag = info.thread_label.unwrap_or(settings.signature);
    format!("{} [{}] ", info.level.label(), tag)
}

pub fn default_formatter() -> Formatter {
    Arc::new(default_prefix)
}
