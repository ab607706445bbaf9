//! Timestamp prefixes written in front of every line
//!
//! Two layouts are supported, both in local time:
//!
//! - [`TimestampStyle::Plain`]: `[2025/01/08 10:30:45]`
//! - [`TimestampStyle::Super`]: `[2025/01/08 10:30:45.123.456]`, where the
//!   first fraction is milliseconds and the second the microseconds within
//!   that millisecond

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampStyle {
    #[default]
    Plain,
    Super,
}

impl TimestampStyle {
    pub fn from_super_flag(enabled: bool) -> Self {
        if enabled {
            TimestampStyle::Super
        } else {
            TimestampStyle::Plain
        }
    }

    /// Render the bracketed prefix for `datetime`
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let base = datetime.format("%Y/%m/%d %H:%M:%S");
        match self {
            TimestampStyle::Plain => format!("[{}]", base),
            TimestampStyle::Super => {
                // Leap seconds report nanos >= 1_000_000_000; clamp into the last microsecond.
                let micros = (datetime.nanosecond() / 1_000).min(999_999);
                format!("[{}.{:03}.{:03}]", base, micros / 1_000, micros % 1_000)
            }
        }
    }
}
