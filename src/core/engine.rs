//! Engine context and control surface
//!
//! An [`Engine`] owns the event bus, the channel table and the worker
//! thread. It moves through three states:
//!
//! ```text
//! Uninitialized --start()--> Running --shutdown()--> Stopped
//! ```
//!
//! There is no way back from `Stopped`. [`EngineBuilder::build`] constructs
//! and starts in one step.

use super::{
    channel_mask::{ChannelId, ChannelMask},
    config::EngineConfig,
    error::{LoggerError, Result},
    event_bus::EventBus,
    formatter::{default_formatter, FormatInfo, FormatSettings, Formatter},
    log_level::LogLevel,
    metrics::EngineMetrics,
    record::Record,
    signature::Signature,
    thread_names::ThreadNames,
    worker::{self, Preprocessor},
};
use crate::channels::{ChannelKind, ChannelRegistry, SharedStream};
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Lifecycle of an [`Engine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, worker not yet spawned
    Uninitialized,
    /// Worker thread draining the event bus
    Running,
    /// Shut down; records are no longer accepted
    Stopped,
}

/// State shared between the engine, its signatures and the worker
pub(crate) struct EngineShared {
    pub(crate) bus: EventBus,
    pub(crate) channels: ChannelRegistry,
    pub(crate) threads: ThreadNames,
    pub(crate) filter: RwLock<LogLevel>,
    pub(crate) formatter: RwLock<Formatter>,
    pub(crate) default_mask: RwLock<ChannelMask>,
    pub(crate) preprocessor: RwLock<Option<Preprocessor>>,
    pub(crate) super_timestamp: AtomicBool,
    pub(crate) metrics: EngineMetrics,
}

impl EngineShared {
    pub(crate) fn new() -> Self {
        Self {
            bus: EventBus::new(),
            channels: ChannelRegistry::new(),
            threads: ThreadNames::new(),
            filter: RwLock::new(LogLevel::Debug),
            formatter: RwLock::new(default_formatter()),
            default_mask: RwLock::new(ChannelMask::stdout()),
            preprocessor: RwLock::new(None),
            super_timestamp: AtomicBool::new(false),
            metrics: EngineMetrics::new(),
        }
    }

    /// Admit one finished session.
    ///
    /// The filter is read at completion time. Below-filter text is discarded
    /// here, after it has already been formatted by the caller.
    pub(crate) fn submit(&self, level: LogLevel, mask: ChannelMask, text: String) -> bool {
        if !level.is_record_level() || !level.passes(*self.filter.read()) {
            self.metrics.record_filtered();
            return false;
        }

        if self.bus.push(text, level, mask) {
            self.metrics.record_enqueued();
            true
        } else {
            self.metrics.record_rejected();
            false
        }
    }
}

pub struct Engine {
    shared: Arc<EngineShared>,
    state: Mutex<EngineState>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Create an engine in the `Uninitialized` state.
    ///
    /// Configuration calls and logging are allowed before [`Engine::start`];
    /// records queue up until the worker runs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(EngineShared::new()),
            state: Mutex::new(EngineState::Uninitialized),
            worker: Mutex::new(None),
        }
    }

    /// Create a builder for Engine
    ///
    /// # Example
    /// ```
    /// use threaded_logger::prelude::*;
    ///
    /// let engine = Engine::builder()
    ///     .filter_level(LogLevel::Info)
    ///     .stdout(false)
    ///     .build();
    /// assert!(engine.is_started());
    /// ```
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Build and start an engine from a loaded configuration
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        EngineBuilder::from_config(config).try_build()
    }

    /// Bind standard output and spawn the worker.
    ///
    /// Calling it on a running engine does nothing; a stopped engine cannot
    /// be restarted.
    pub fn start(&self) -> Result<()> {
        let mut state = self.state.lock();
        match *state {
            EngineState::Running => Ok(()),
            EngineState::Stopped => Err(LoggerError::EngineStopped),
            EngineState::Uninitialized => {
                self.shared.channels.bind_stdout();
                let handle = worker::spawn(Arc::clone(&self.shared))?;
                *self.worker.lock() = Some(handle);
                *state = EngineState::Running;
                Ok(())
            }
        }
    }

    pub fn state(&self) -> EngineState {
        *self.state.lock()
    }

    pub fn is_started(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Minimum level a session must have to produce a record.
    /// [`LogLevel::Quiet`] silences everything.
    pub fn set_filter_level(&self, level: LogLevel) {
        *self.shared.filter.write() = level;
    }

    pub fn filter_level(&self) -> LogLevel {
        *self.shared.filter.read()
    }

    /// Register a file channel opened for appending.
    ///
    /// The new channel joins the default channel set, so signatures created
    /// afterwards write to it.
    pub fn add_file(&self, path: impl AsRef<Path>) -> Result<ChannelId> {
        let id = self.shared.channels.add_file(path)?;
        self.shared.default_mask.write().insert(id);
        Ok(id)
    }

    /// Register an externally owned stream. The engine never closes it and
    /// leaves flushing to its owner.
    pub fn add_stream<W: Write + Send + 'static>(&self, stream: Arc<Mutex<W>>) -> Result<ChannelId> {
        let stream: SharedStream = stream;
        let id = self.shared.channels.add_stream(stream)?;
        self.shared.default_mask.write().insert(id);
        Ok(id)
    }

    /// Switch channel 0 on or off for records delivered from now on
    pub fn set_stdout(&self, enabled: bool) {
        self.shared.channels.set_stdout(enabled);
    }

    /// Replace the process stdout behind channel 0 with `stream`
    pub fn set_console_stream<W: Write + Send + 'static>(&self, stream: Arc<Mutex<W>>) {
        let stream: SharedStream = stream;
        self.shared.channels.redirect_stdout(stream);
    }

    pub fn set_channel_enabled(&self, id: ChannelId, enabled: bool) -> Result<()> {
        self.shared.channels.set_enabled(id, enabled)
    }

    /// Close one channel and drop it from the default channel set. The id
    /// is not reused.
    pub fn close_channel(&self, id: ChannelId) -> Result<()> {
        self.shared.channels.close(id)?;
        self.shared.default_mask.write().remove(id);
        Ok(())
    }

    pub fn channel_kind(&self, id: ChannelId) -> ChannelKind {
        self.shared.channels.kind(id)
    }

    pub fn is_channel_valid(&self, id: ChannelId) -> bool {
        self.shared.channels.is_valid(id)
    }

    pub fn channel_path(&self, id: ChannelId) -> Option<PathBuf> {
        self.shared.channels.path(id)
    }

    /// Label the calling thread in the default line prefix
    pub fn claim_thread_name(&self, name: impl Into<String>) {
        self.shared.threads.claim(name);
    }

    /// Drop the calling thread's label, returning it if one was claimed
    pub fn release_thread_name(&self) -> Option<String> {
        self.shared.threads.release()
    }

    /// Install the hook the worker runs on a copy of every record.
    ///
    /// Its return value is advisory: the worker ignores it.
    pub fn install_preprocessor<F>(&self, preprocessor: F)
    where
        F: Fn(&mut Record) -> bool + Send + Sync + 'static,
    {
        *self.shared.preprocessor.write() = Some(Arc::new(preprocessor));
    }

    pub fn install_shared_preprocessor(&self, preprocessor: Preprocessor) {
        *self.shared.preprocessor.write() = Some(preprocessor);
    }

    pub fn clear_preprocessor(&self) {
        *self.shared.preprocessor.write() = None;
    }

    /// Replace the prefix formatter for signatures created from now on.
    /// Existing signatures keep the formatter they were built with.
    pub fn set_formatter<F>(&self, formatter: F)
    where
        F: Fn(&FormatSettings<'_>, &FormatInfo<'_>) -> String + Send + Sync + 'static,
    {
        *self.shared.formatter.write() = Arc::new(formatter);
    }

    pub fn reset_formatter(&self) {
        *self.shared.formatter.write() = default_formatter();
    }

    /// Channel set snapshotted by signatures created from now on
    pub fn set_default_channels(&self, mask: ChannelMask) {
        *self.shared.default_mask.write() = mask;
    }

    pub fn default_channels(&self) -> ChannelMask {
        *self.shared.default_mask.read()
    }

    /// Use the millisecond/microsecond timestamp prefix
    pub fn enable_super_timestamp(&self, enabled: bool) {
        self.shared.super_timestamp.store(enabled, Ordering::Relaxed);
    }

    pub fn super_timestamp(&self) -> bool {
        self.shared.super_timestamp.load(Ordering::Relaxed)
    }

    /// Create a named logger handle bound to this engine
    pub fn signature(&self, name: impl Into<String>) -> Signature {
        Signature::from_shared(Arc::clone(&self.shared), name.into())
    }

    /// Get the engine metrics for observability
    pub fn metrics(&self) -> &EngineMetrics {
        &self.shared.metrics
    }

    /// Records waiting in the event bus
    pub fn pending(&self) -> usize {
        self.shared.bus.len()
    }

    /// Stop accepting records, wait for the worker to deliver everything
    /// already queued, then close every channel.
    ///
    /// Blocks until the worker has drained the queue. Returns `false` when
    /// the worker thread had panicked; whatever it left behind is then
    /// delivered on the calling thread. Calling it again is a no-op.
    pub fn shutdown(&self) -> bool {
        let mut state = self.state.lock();
        if *state == EngineState::Stopped {
            return true;
        }

        self.shared.bus.stop();

        let mut clean = true;
        match self.worker.lock().take() {
            Some(handle) => {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Worker thread panicked during shutdown: {:?}", e);
                    clean = false;
                    worker::drain(&self.shared);
                }
            }
            // Never started: deliver the backlog here.
            None => {
                self.shared.channels.bind_stdout();
                worker::drain(&self.shared);
            }
        }

        self.shared.channels.close_all();
        *state = EngineState::Stopped;
        clean
    }

    /// Shut down, then terminate the process with `code`
    pub fn exit(&self, code: i32) -> ! {
        self.shutdown();
        std::process::exit(code)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();

        let rejected = self.shared.metrics.rejected();
        if rejected > 0 {
            eprintln!(
                "[LOGGER WARNING] {} records were committed after shutdown and discarded",
                rejected
            );
        }
    }
}

/// Builder for constructing Engine with a fluent API
///
/// # Example
/// ```no_run
/// use threaded_logger::prelude::*;
///
/// let engine = Engine::builder()
///     .filter_level(LogLevel::Debug)
///     .super_timestamp(true)
///     .file("app.log")
///     .build();
/// ```
pub struct EngineBuilder {
    filter_level: LogLevel,
    super_timestamp: bool,
    stdout: bool,
    console: Option<SharedStream>,
    files: Vec<PathBuf>,
    preprocessor: Option<Preprocessor>,
    formatter: Option<Formatter>,
    default_channels: Option<ChannelMask>,
}

impl EngineBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            filter_level: LogLevel::Debug,
            super_timestamp: false,
            stdout: true,
            console: None,
            files: Vec::new(),
            preprocessor: None,
            formatter: None,
            default_channels: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut builder = Self::new()
            .filter_level(config.filter_level)
            .super_timestamp(config.super_timestamp)
            .stdout(config.stdout);
        builder.files.extend(config.files.iter().cloned());
        builder
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter_level(mut self, level: LogLevel) -> Self {
        self.filter_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn super_timestamp(mut self, enabled: bool) -> Self {
        self.super_timestamp = enabled;
        self
    }

    /// Whether channel 0 starts enabled
    #[must_use = "builder methods return a new value"]
    pub fn stdout(mut self, enabled: bool) -> Self {
        self.stdout = enabled;
        self
    }

    /// Send channel 0's output to `stream` instead of the process stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_stream<W: Write + Send + 'static>(mut self, stream: Arc<Mutex<W>>) -> Self {
        let stream: SharedStream = stream;
        self.console = Some(stream);
        self
    }

    /// Open `path` as a file channel when the engine is built.
    ///
    /// A file that fails to open is reported on stderr and skipped.
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn preprocessor<F>(mut self, preprocessor: F) -> Self
    where
        F: Fn(&mut Record) -> bool + Send + Sync + 'static,
    {
        self.preprocessor = Some(Arc::new(preprocessor));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&FormatSettings<'_>, &FormatInfo<'_>) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Override the default channel set computed from the registered
    /// channels
    #[must_use = "builder methods return a new value"]
    pub fn default_channels(mut self, mask: ChannelMask) -> Self {
        self.default_channels = Some(mask);
        self
    }

    /// Build and start the Engine.
    ///
    /// If the worker thread cannot be spawned the failure is reported on
    /// stderr and the engine stays `Uninitialized`; queued records are then
    /// delivered by `shutdown`.
    pub fn build(self) -> Engine {
        let engine = self.configure();
        if let Err(e) = engine.start() {
            eprintln!("[LOGGER ERROR] Failed to start worker thread: {}", e);
        }
        engine
    }

    /// Build and start the Engine, returning the spawn failure if any
    pub fn try_build(self) -> Result<Engine> {
        let engine = self.configure();
        engine.start()?;
        Ok(engine)
    }

    /// Build without starting the worker
    pub fn build_uninitialized(self) -> Engine {
        self.configure()
    }

    fn configure(self) -> Engine {
        let engine = Engine::new();
        engine.set_filter_level(self.filter_level);
        engine.enable_super_timestamp(self.super_timestamp);
        engine.set_stdout(self.stdout);

        if let Some(console) = self.console {
            engine.shared.channels.redirect_stdout(console);
        }
        for path in &self.files {
            if let Err(e) = engine.add_file(path) {
                eprintln!("[LOGGER WARNING] Skipping file channel: {}", e);
            }
        }
        if let Some(preprocessor) = self.preprocessor {
            engine.install_shared_preprocessor(preprocessor);
        }
        if let Some(formatter) = self.formatter {
            *engine.shared.formatter.write() = formatter;
        }
        if let Some(mask) = self.default_channels {
            engine.set_default_channels(mask);
        }

        engine
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
