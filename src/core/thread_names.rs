//! Display labels claimed by threads

use parking_lot::Mutex;
use std::collections::HashMap;
use std::thread::{self, ThreadId};

/// Association of threads with a display label, consulted only when a
/// session renders its prefix.
#[derive(Debug, Default)]
pub struct ThreadNames {
    names: Mutex<HashMap<ThreadId, String>>,
}

impl ThreadNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate the calling thread with `name`, replacing any earlier claim
    pub fn claim(&self, name: impl Into<String>) {
        self.names.lock().insert(thread::current().id(), name.into());
    }

    /// Label claimed by the calling thread
    pub fn current(&self) -> Option<String> {
        self.lookup(thread::current().id())
    }

    pub fn lookup(&self, id: ThreadId) -> Option<String> {
        self.names.lock().get(&id).cloned()
    }

    /// Drop the calling thread's claim
    pub fn release(&self) -> Option<String> {
        self.names.lock().remove(&thread::current().id())
    }
}
