//! Engine metrics for observability
//!
//! Counters for the admission path (enqueued, filtered, rejected after
//! shutdown) and the delivery path (records processed, records that reached
//! at least one channel, channel failures, preprocessor panics).

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for engine observability
///
/// # Example
///
/// ```
/// use threaded_logger::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Records accepted by the event bus
    enqueued: AtomicU64,

    /// Records discarded by the level filter
    filtered: AtomicU64,

    /// Records refused because the engine was already stopped
    rejected: AtomicU64,

    /// Records taken off the bus and handled by the worker
    processed: AtomicU64,

    /// Records written to at least one channel
    delivered: AtomicU64,

    /// Channels invalidated after a failed write
    channel_failures: AtomicU64,

    /// Preprocessor invocations that panicked
    preprocessor_panics: AtomicU64,
}

impl EngineMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            channel_failures: AtomicU64::new(0),
            preprocessor_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn channel_failures(&self) -> u64 {
        self.channel_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn preprocessor_panics(&self) -> u64 {
        self.preprocessor_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_processed(&self) -> u64 {
        self.processed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_channel_failure(&self) -> u64 {
        self.channel_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_preprocessor_panic(&self) -> u64 {
        self.preprocessor_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Records accepted but not yet processed by the worker
    pub fn in_flight(&self) -> u64 {
        self.enqueued().saturating_sub(self.processed())
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.channel_failures.store(0, Ordering::Relaxed);
        self.preprocessor_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            filtered: AtomicU64::new(self.filtered()),
            rejected: AtomicU64::new(self.rejected()),
            processed: AtomicU64::new(self.processed()),
            delivered: AtomicU64::new(self.delivered()),
            channel_failures: AtomicU64::new(self.channel_failures()),
            preprocessor_panics: AtomicU64::new(self.preprocessor_panics()),
        }
    }
}
