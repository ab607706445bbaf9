//! Error types for the logging engine
//!
//! Configuration calls report failure through these values instead of
//! panicking. Nothing raised inside the worker thread is ever returned to a
//! caller; the worker degrades to dropping the affected record or channel.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Every slot of the channel table has been handed out
    #[error("Channel table exhausted: all {capacity} channel slots are in use")]
    ChannelTableFull { capacity: usize },

    /// A file channel could not be opened for appending
    #[error("Failed to open channel {id} for '{}': {source}", path.display())]
    ChannelOpen {
        id: u8,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A signature referenced a channel that was not validly registered
    /// before the signature was constructed
    #[error("Channel {id} is not a registered, valid channel for this signature")]
    UnregisteredChannel { id: u8 },

    /// Channel id outside the table
    #[error("Channel id {id} is out of range (capacity {capacity})")]
    InvalidChannel { id: u8, capacity: usize },

    /// The engine has been shut down and cannot be restarted
    #[error("Logging engine already stopped")]
    EngineStopped,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a channel table exhaustion error
    pub fn table_full(capacity: usize) -> Self {
        LoggerError::ChannelTableFull { capacity }
    }

    /// Create a file channel open error
    pub fn channel_open(id: u8, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoggerError::ChannelOpen {
            id,
            path: path.into(),
            source,
        }
    }

    /// Create an unregistered channel error
    pub fn unregistered(id: u8) -> Self {
        LoggerError::UnregisteredChannel { id }
    }

    /// Create an out-of-range channel error
    pub fn invalid_channel(id: u8, capacity: usize) -> Self {
        LoggerError::InvalidChannel { id, capacity }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
