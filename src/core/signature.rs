//! Named logger handles

use super::{
    channel_mask::{ChannelId, ChannelMask},
    engine::{Engine, EngineShared},
    error::{LoggerError, Result},
    formatter::{FormatInfo, FormatSettings, Formatter},
    log_level::LogLevel,
    session::Session,
};
use std::fmt;
use std::sync::Arc;
use std::thread;

/// A named logger created once per module or component.
///
/// A signature snapshots the engine's formatter and default channel set when
/// it is created; later changes to either do not reach existing signatures.
/// Its level methods open a [`Session`] that commits one record when it
/// completes.
///
/// # Example
/// ```
/// use threaded_logger::prelude::*;
///
/// let engine = Engine::builder().stdout(false).build();
/// let net = Signature::new(&engine, "net");
/// net.info().append("listening on ").append(8080);
/// engine.shutdown();
/// ```
#[derive(Clone)]
pub struct Signature {
    name: Arc<str>,
    formatter: Formatter,
    mask: ChannelMask,
    /// Channel ids allocated when this signature was created
    registered: usize,
    shared: Arc<EngineShared>,
}

impl Signature {
    pub fn new(engine: &Engine, name: impl Into<String>) -> Self {
        engine.signature(name)
    }

    /// Snapshot the engine defaults. Default channels that are not validly
    /// registered at this point are left out of the signature's set.
    pub(crate) fn from_shared(shared: Arc<EngineShared>, name: String) -> Self {
        let formatter = shared.formatter.read().clone();
        let registered = shared.channels.registered();
        let defaults = *shared.default_mask.read();
        let mask = defaults
            .iter()
            .filter(|&id| usable(&shared, registered, id))
            .collect();
        Self {
            name: name.into(),
            formatter,
            mask,
            registered,
            shared,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> ChannelMask {
        self.mask
    }

    /// Also write to channel `id`.
    ///
    /// Only channels that were validly registered before this signature was
    /// created are accepted; otherwise the channel set is left unchanged.
    pub fn attach_channel(&mut self, id: ChannelId) -> Result<()> {
        if !usable(&self.shared, self.registered, id) {
            return Err(LoggerError::unregistered(id.raw()));
        }
        self.mask.insert(id);
        Ok(())
    }

    pub fn detach_channel(&mut self, id: ChannelId) {
        self.mask.remove(id);
    }

    #[inline]
    pub fn debug(&self) -> Session<'_> {
        self.session(LogLevel::Debug)
    }

    #[inline]
    pub fn info(&self) -> Session<'_> {
        self.session(LogLevel::Info)
    }

    #[inline]
    pub fn warn(&self) -> Session<'_> {
        self.session(LogLevel::Warn)
    }

    #[inline]
    pub fn error(&self) -> Session<'_> {
        self.session(LogLevel::Error)
    }

    #[inline]
    pub fn fatal(&self) -> Session<'_> {
        self.session(LogLevel::Fatal)
    }

    /// Open a session at `level`. A `Quiet` session never produces a record.
    pub fn session(&self, level: LogLevel) -> Session<'_> {
        Session::open(self, level)
    }

    /// Render the line prefix on the calling thread
    pub(crate) fn render_prefix(&self, level: LogLevel) -> String {
        let thread_label = self.shared.threads.current();
        let settings = FormatSettings {
            signature: &self.name,
            channels: self.mask,
        };
        let info = FormatInfo {
            level,
            thread_label: thread_label.as_deref(),
            thread_id: thread::current().id(),
        };
        (self.formatter)(&settings, &info)
    }

    pub(crate) fn submit(&self, level: LogLevel, text: String) -> bool {
        self.shared.submit(level, self.mask, text)
    }
}

/// Standard output is always selectable; any other channel must have been
/// allocated before the signature and still be valid.
fn usable(shared: &EngineShared, registered: usize, id: ChannelId) -> bool {
    id == ChannelId::STDOUT || (id.index() < registered && shared.channels.is_valid(id))
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("name", &self.name)
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}
