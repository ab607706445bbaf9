//! The single background writer
//!
//! The worker is the only thread that ever writes to a channel. For each
//! record it runs the installed preprocessor on a copy, renders the
//! timestamp prefix and hands the line to every selected channel:
//!
//! - standard output and external streams receive the preprocessed text
//! - file channels receive the original text, keeping terminal escape codes
//!   out of persisted logs
//!
//! The preprocessor's boolean result is advisory only. It is computed and
//! then ignored; returning `false` does not suppress the record.

use super::engine::EngineShared;
use super::record::Record;
use super::timestamp::TimestampStyle;
use crate::channels::Delivery;
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const WORKER_THREAD_NAME: &str = "threaded-logger-worker";

/// Hook run by the worker on a copy of each record before delivery
pub type Preprocessor = Arc<dyn Fn(&mut Record) -> bool + Send + Sync>;

pub(crate) fn spawn(shared: Arc<EngineShared>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || drain(&shared))
}

/// Deliver records until the bus reports end-of-stream
pub(crate) fn drain(shared: &EngineShared) {
    while let Some(record) = shared.bus.pop() {
        process(shared, &record);
    }
}

fn process(shared: &EngineShared, record: &Record) {
    let mut processed = record.clone();

    let preprocessor = shared.preprocessor.read().clone();
    if let Some(preprocessor) = preprocessor {
        let outcome = catch_unwind(AssertUnwindSafe(|| preprocessor(&mut processed)));
        if let Err(panic_info) = outcome {
            eprintln!(
                "[LOGGER CRITICAL] Preprocessor panicked: {}. Delivering the unprocessed text.",
                panic_message(panic_info.as_ref())
            );
            shared.metrics.record_preprocessor_panic();
            processed.text.clone_from(&record.text);
        }
    }

    let style = TimestampStyle::from_super_flag(shared.super_timestamp.load(Ordering::Relaxed));
    let stamp = style.format(&record.timestamp);
    let raw_line = render_line(&stamp, &record.text);
    let processed_line = render_line(&stamp, &processed.text);

    let mut written = false;
    for id in record.mask.iter() {
        match shared.channels.deliver(id, &raw_line, &processed_line) {
            Delivery::Written => written = true,
            Delivery::Skipped => {}
            Delivery::Failed(e) => {
                eprintln!(
                    "[LOGGER ERROR] Channel #{} failed and was invalidated: {}",
                    id, e
                );
                shared.metrics.record_channel_failure();
            }
        }
    }

    if written {
        shared.metrics.record_delivered();
    }
    shared.metrics.record_processed();
}

fn render_line(stamp: &str, text: &str) -> String {
    let mut line = String::with_capacity(stamp.len() + text.len() + 2);
    line.push_str(stamp);
    line.push(' ');
    line.push_str(text);
    line.push('\n');
    line
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
