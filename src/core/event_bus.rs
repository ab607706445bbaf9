//! FIFO hand-off between producer threads and the worker
//!
//! A single lock guards the queue, so records leave in exactly the order
//! they were enqueued across all producers. The queue is unbounded: a burst
//! of producers outrunning the worker grows memory without limit. Admission
//! control is the level filter only.

use super::channel_mask::ChannelMask;
use super::log_level::LogLevel;
use super::record::Record;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

#[derive(Debug, Default)]
struct BusState {
    queue: VecDeque<Record>,
    stopped: bool,
}

#[derive(Debug, Default)]
pub struct EventBus {
    state: Mutex<BusState>,
    available: Condvar,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp and enqueue a record, waking one waiting consumer.
    ///
    /// Returns `false` without enqueueing once the bus has been stopped:
    /// nothing would be left to drain it.
    pub fn push(&self, text: String, level: LogLevel, mask: ChannelMask) -> bool {
        let mut state = self.state.lock();
        if state.stopped {
            return false;
        }
        state.queue.push_back(Record::new(level, mask, text));
        self.available.notify_one();
        true
    }

    /// Block until a record is available.
    ///
    /// Returns `None` only when the bus is stopped and fully drained.
    pub fn pop(&self) -> Option<Record> {
        let mut state = self.state.lock();
        loop {
            if let Some(record) = state.queue.pop_front() {
                return Some(record);
            }
            if state.stopped {
                return None;
            }
            self.available.wait(&mut state);
        }
    }

    /// Mark the bus stopped and wake every waiter. Queued records stay
    /// poppable.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        state.stopped = true;
        self.available.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
