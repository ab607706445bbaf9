//! Ready-made record preprocessors
//!
//! A preprocessor runs on the worker thread against a copy of each record.
//! Its output reaches standard output and external streams only; file
//! channels always receive the original text.

#[cfg(feature = "color")]
pub mod color;

#[cfg(feature = "color")]
pub use color::{color_preprocessor, ColorScheme, Rgb};

use crate::core::{Preprocessor, Record};
use std::sync::Arc;

/// Wrap every record's text in `open` and `close`
pub fn marker_preprocessor(open: impl Into<String>, close: impl Into<String>) -> Preprocessor {
    let open = open.into();
    let close = close.into();
    Arc::new(move |record: &mut Record| {
        record.text.insert_str(0, &open);
        record.text.push_str(&close);
        true
    })
}
