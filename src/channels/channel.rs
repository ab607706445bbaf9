//! Output sinks held in the channel table

use parking_lot::Mutex;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A text stream owned by the application. The engine writes to it but
/// never closes or flushes it on the owner's behalf.
pub type SharedStream = Arc<Mutex<dyn Write + Send>>;

/// Where channel 0 writes
pub enum ConsoleTarget {
    /// The process's standard output
    Process,
    /// A caller-supplied replacement for standard output
    Redirected(SharedStream),
}

/// Kind of sink occupying a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Unused,
    Stdout,
    File,
    Stream,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Unused => "unused",
            ChannelKind::Stdout => "stdout",
            ChannelKind::File => "file",
            ChannelKind::Stream => "stream",
        };
        f.write_str(name)
    }
}

pub enum Channel {
    Unused,
    Stdout(ConsoleTarget),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
    Stream(SharedStream),
}

impl Channel {
    /// Open `path` for appending, creating it when missing
    pub fn open_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Channel::File {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::Unused => ChannelKind::Unused,
            Channel::Stdout(_) => ChannelKind::Stdout,
            Channel::File { .. } => ChannelKind::File,
            Channel::Stream(_) => ChannelKind::Stream,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Channel::File { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Write one complete line.
    ///
    /// Files receive `raw` and are flushed immediately; the console and
    /// external streams receive `processed`.
    pub fn write_line(&mut self, raw: &str, processed: &str) -> io::Result<()> {
        match self {
            Channel::Unused => Ok(()),
            Channel::Stdout(ConsoleTarget::Process) => {
                let mut out = io::stdout().lock();
                out.write_all(processed.as_bytes())?;
                out.flush()
            }
            Channel::Stdout(ConsoleTarget::Redirected(stream)) | Channel::Stream(stream) => {
                stream.lock().write_all(processed.as_bytes())
            }
            Channel::File { writer, .. } => {
                writer.write_all(raw.as_bytes())?;
                writer.flush()
            }
        }
    }

    /// Release the sink. Files are flushed and closed; shared streams are
    /// only let go of.
    pub fn close(&mut self) -> io::Result<()> {
        match std::mem::replace(self, Channel::Unused) {
            Channel::File { mut writer, .. } => writer.flush(),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Unused => f.write_str("Unused"),
            Channel::Stdout(ConsoleTarget::Process) => f.write_str("Stdout"),
            Channel::Stdout(ConsoleTarget::Redirected(_)) => f.write_str("Stdout(redirected)"),
            Channel::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
            Channel::Stream(_) => f.write_str("Stream"),
        }
    }
}
