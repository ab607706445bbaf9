//! Fixed-capacity table of output channels
//!
//! Slot 0 is reserved for standard output and bound when the worker starts.
//! Slots 1.. are handed out in order and never reused, even when opening the
//! sink fails. Every slot has its own lock so that configuration changes
//! never race with the worker reading `valid`/`enabled` during a write.

use super::channel::{Channel, ChannelKind, ConsoleTarget, SharedStream};
use crate::core::{ChannelId, LoggerError, Result, CHANNEL_CAPACITY};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
struct SlotState {
    channel: Channel,
    /// Sink opened or bound successfully and no write has failed since
    valid: bool,
    /// Administratively switched on
    enabled: bool,
}

impl SlotState {
    fn unused() -> Self {
        Self {
            channel: Channel::Unused,
            valid: false,
            enabled: false,
        }
    }
}

/// Result of handing one line to one channel
#[derive(Debug)]
pub enum Delivery {
    Written,
    /// Channel invalid, disabled or unused
    Skipped,
    /// The write failed and the channel has been invalidated
    Failed(io::Error),
}

#[derive(Debug)]
pub struct ChannelRegistry {
    slots: [Mutex<SlotState>; CHANNEL_CAPACITY],
    /// Next id to hand out; doubles as the count of registered ids
    next_id: Mutex<usize>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        let slots: [Mutex<SlotState>; CHANNEL_CAPACITY] =
            std::array::from_fn(|_| Mutex::new(SlotState::unused()));
        slots[0].lock().enabled = true;
        Self {
            slots,
            next_id: Mutex::new(1),
        }
    }

    /// Register a file channel opened for appending.
    ///
    /// On open failure the id is still consumed and its slot stays invalid.
    pub fn add_file(&self, path: impl AsRef<Path>) -> Result<ChannelId> {
        let path = path.as_ref();
        let mut next_id = self.next_id.lock();
        let id = ChannelId::new(*next_id).ok_or_else(|| LoggerError::table_full(CHANNEL_CAPACITY))?;
        *next_id += 1;

        let mut slot = self.slots[id.index()].lock();
        match Channel::open_file(path) {
            Ok(channel) => {
                *slot = SlotState {
                    channel,
                    valid: true,
                    enabled: true,
                };
                Ok(id)
            }
            Err(e) => {
                slot.valid = false;
                Err(LoggerError::channel_open(id.raw(), path, e))
            }
        }
    }

    /// Register an externally owned stream. The registry keeps a handle but
    /// never closes it.
    pub fn add_stream(&self, stream: SharedStream) -> Result<ChannelId> {
        let mut next_id = self.next_id.lock();
        let id = ChannelId::new(*next_id).ok_or_else(|| LoggerError::table_full(CHANNEL_CAPACITY))?;
        *next_id += 1;

        *self.slots[id.index()].lock() = SlotState {
            channel: Channel::Stream(stream),
            valid: true,
            enabled: true,
        };
        Ok(id)
    }

    /// Bind channel 0 to standard output unless it was redirected already
    pub fn bind_stdout(&self) {
        let mut slot = self.slots[0].lock();
        if matches!(slot.channel, Channel::Unused) {
            slot.channel = Channel::Stdout(ConsoleTarget::Process);
        }
        slot.valid = true;
    }

    /// Send channel 0's output to `stream` instead of the process stdout
    pub fn redirect_stdout(&self, stream: SharedStream) {
        self.slots[0].lock().channel = Channel::Stdout(ConsoleTarget::Redirected(stream));
    }

    /// Toggle channel 0's `enabled` flag
    pub fn set_stdout(&self, enabled: bool) {
        self.slots[0].lock().enabled = enabled;
    }

    pub fn set_enabled(&self, id: ChannelId, enabled: bool) -> Result<()> {
        self.ensure_registered(id)?;
        self.slots[id.index()].lock().enabled = enabled;
        Ok(())
    }

    /// Close a single channel. Its id stays allocated.
    pub fn close(&self, id: ChannelId) -> Result<()> {
        self.ensure_registered(id)?;
        let mut slot = self.slots[id.index()].lock();
        slot.valid = false;
        slot.enabled = false;
        slot.channel.close()?;
        Ok(())
    }

    /// Close every channel: files are flushed and closed, shared streams are
    /// released untouched
    pub fn close_all(&self) {
        for (idx, slot) in self.slots.iter().enumerate() {
            let mut slot = slot.lock();
            slot.valid = false;
            if let Err(e) = slot.channel.close() {
                eprintln!("[LOGGER ERROR] Failed to close channel #{}: {}", idx, e);
            }
        }
    }

    /// Write one line to channel `id` if it is valid and enabled
    pub fn deliver(&self, id: ChannelId, raw: &str, processed: &str) -> Delivery {
        let mut slot = self.slots[id.index()].lock();
        if !slot.valid || !slot.enabled {
            return Delivery::Skipped;
        }
        match slot.channel.write_line(raw, processed) {
            Ok(()) => Delivery::Written,
            Err(e) => {
                slot.valid = false;
                Delivery::Failed(e)
            }
        }
    }

    /// Number of ids handed out so far, including the stdout slot
    pub fn registered(&self) -> usize {
        *self.next_id.lock()
    }

    pub fn is_valid(&self, id: ChannelId) -> bool {
        self.slots[id.index()].lock().valid
    }

    pub fn is_enabled(&self, id: ChannelId) -> bool {
        self.slots[id.index()].lock().enabled
    }

    pub fn kind(&self, id: ChannelId) -> ChannelKind {
        self.slots[id.index()].lock().channel.kind()
    }

    pub fn path(&self, id: ChannelId) -> Option<PathBuf> {
        self.slots[id.index()].lock().channel.path().map(Path::to_path_buf)
    }

    fn ensure_registered(&self, id: ChannelId) -> Result<()> {
        if id.index() < self.registered() {
            Ok(())
        } else {
            Err(LoggerError::unregistered(id.raw()))
        }
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a writer so it can be registered as a stream channel
pub fn shared_stream<W: Write + Send + 'static>(writer: W) -> Arc<Mutex<W>> {
    Arc::new(Mutex::new(writer))
}
