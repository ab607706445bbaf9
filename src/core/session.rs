//! Per-statement record builder

use super::log_level::LogLevel;
use super::signature::Signature;
use std::fmt::{self, Write};

/// Accumulates the text of one log statement and pushes exactly one record
/// when it completes.
///
/// Completion is either an explicit [`Session::commit`] or dropping the
/// session, typically at the end of the statement that created it. The
/// prefix and every appended value are rendered eagerly; if the level is
/// below the engine's filter at completion the text is thrown away, so the
/// filter saves the I/O but not the formatting.
///
/// ```
/// use threaded_logger::prelude::*;
///
/// let engine = Engine::builder().stdout(false).build();
/// let signature = engine.signature("mod");
///
/// signature.info().append("hello ").append(42);
///
/// let mut session = signature.warn();
/// for part in ["a", "b"] {
///     session.push(part);
/// }
/// session.commit();
/// # engine.shutdown();
/// ```
pub struct Session<'a> {
    signature: &'a Signature,
    level: LogLevel,
    buffer: String,
    finished: bool,
}

impl<'a> Session<'a> {
    pub(crate) fn open(signature: &'a Signature, level: LogLevel) -> Self {
        Self {
            signature,
            level,
            buffer: signature.render_prefix(level),
            finished: false,
        }
    }

    /// Append the `Display` rendering of `value`
    pub fn append<T: fmt::Display>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append the `Debug` rendering of `value`, for types without a textual
    /// `Display` form
    pub fn append_debug<T: fmt::Debug>(mut self, value: T) -> Self {
        let _ = write!(self.buffer, "{:?}", value);
        self
    }

    /// Append in place, for building a session across several statements
    pub fn push<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        let _ = write!(self.buffer, "{}", value);
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Text accumulated so far, prefix included
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Complete the session now. Returns whether a record was enqueued.
    pub fn commit(mut self) -> bool {
        self.finish()
    }

    fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        let text = std::mem::take(&mut self.buffer);
        self.signature.submit(self.level, text)
    }
}

impl Write for Session<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signature", &self.signature.name())
            .field("level", &self.level)
            .field("buffer", &self.buffer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::channels::shared_stream;
    use crate::core::{Engine, LogLevel};
    use std::fmt::Write;

    #[test]
    fn test_drop_pushes_once() {
        let engine = Engine::builder().stdout(false).build();
        let sink = shared_stream(Vec::<u8>::new());
        engine.add_stream(sink.clone()).unwrap();
        let signature = engine.signature("mod");

        signature.info().append("hello ").append(42);
        engine.shutdown();

        let text = String::from_utf8(sink.lock().clone()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with("[INFO] [mod] hello 42\n"));
        assert_eq!(engine.metrics().enqueued(), 1);
    }

    #[test]
    fn test_commit_then_drop_pushes_once() {
        let engine = Engine::builder().stdout(false).build();
        let signature = engine.signature("mod");

        let session = signature.error().append("once");
        assert!(session.commit());
        engine.shutdown();

        assert_eq!(engine.metrics().enqueued(), 1);
    }

    #[test]
    fn test_text_is_rendered_even_when_filtered() {
        let engine = Engine::builder().stdout(false).filter_level(LogLevel::Error).build();
        let signature = engine.signature("mod");

        let session = signature.debug().append("expensive ").append_debug(vec![1, 2]);
        assert_eq!(session.text(), "[DEBUG] [mod] expensive [1, 2]");
        assert!(!session.commit());
        assert_eq!(engine.metrics().filtered(), 1);
        assert_eq!(engine.metrics().enqueued(), 0);
    }

    #[test]
    fn test_fmt_write_and_push() {
        let engine = Engine::builder().stdout(false).build();
        let signature = engine.signature("w");

        let mut session = signature.warn();
        write!(session, "{}-{}", 1, 2).unwrap();
        session.push(" ").push(true);
        assert_eq!(session.level(), LogLevel::Warn);
        assert_eq!(session.text(), "[WARN] [w] 1-2 true");
    }

    #[test]
    fn test_quiet_session_never_enqueues() {
        let engine = Engine::builder().stdout(false).build();
        let signature = engine.signature("q");

        assert!(!signature.session(LogLevel::Quiet).append("nothing").commit());
        assert_eq!(engine.metrics().enqueued(), 0);
    }
}
