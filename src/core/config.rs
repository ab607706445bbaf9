//! Engine configuration loaded from JSON
//!
//! ```json
//! {
//!   "filter_level": "info",
//!   "super_timestamp": true,
//!   "stdout": true,
//!   "files": ["app.log"]
//! }
//! ```
//!
//! Every field is optional.

use super::channel_mask::CHANNEL_CAPACITY;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub filter_level: LogLevel,
    pub super_timestamp: bool,
    pub stdout: bool,
    pub files: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            filter_level: LogLevel::Debug,
            super_timestamp: false,
            stdout: true,
            files: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that could never be satisfied
    pub fn validate(&self) -> Result<()> {
        // Slot 0 is stdout.
        if self.files.len() >= CHANNEL_CAPACITY {
            return Err(LoggerError::config(
                "EngineConfig",
                format!(
                    "{} files requested but only {} channel slots are available",
                    self.files.len(),
                    CHANNEL_CAPACITY - 1
                ),
            ));
        }
        if let Some(empty) = self.files.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(LoggerError::config(
                "EngineConfig",
                format!("files[{}] is an empty path", empty),
            ));
        }
        Ok(())
    }
}
