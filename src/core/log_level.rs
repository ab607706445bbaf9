//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record, ordered `Debug < Info < Warn < Error < Fatal`.
///
/// `Quiet` sorts above every record level and only makes sense as a filter
/// value: setting it as the filter silences the engine. No record ever
/// carries `Quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Quiet = 5,
}

impl LogLevel {
    /// Levels a record can carry, in ascending order
    pub const RECORD_LEVELS: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Quiet => "QUIET",
        }
    }

    /// Bracketed label used in the default line prefix, e.g. `[INFO]`
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Info => "[INFO]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Error => "[ERROR]",
            LogLevel::Fatal => "[FATAL]",
            LogLevel::Quiet => "[QUIET]",
        }
    }

    /// Whether a record may carry this level
    #[inline]
    pub fn is_record_level(&self) -> bool {
        *self != LogLevel::Quiet
    }

    /// Whether a record at this level is admitted by `filter`
    #[inline]
    pub fn passes(&self, filter: LogLevel) -> bool {
        *self >= filter
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            "QUIET" => Ok(LogLevel::Quiet),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
