//! Level-based terminal coloring

use crate::core::{LogLevel, Preprocessor, Record};
use colored::Colorize;
use std::sync::Arc;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One color per record level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub debug: Rgb,
    pub info: Rgb,
    pub warn: Rgb,
    pub error: Rgb,
    pub fatal: Rgb,
}

impl ColorScheme {
    pub const BUILTIN: ColorScheme = ColorScheme {
        debug: Rgb(144, 238, 144),
        info: Rgb(255, 255, 255),
        warn: Rgb(255, 165, 0),
        error: Rgb(255, 99, 71),
        fatal: Rgb(178, 34, 34),
    };

    /// Palette matching the VS Code dark terminal theme
    pub const VSCODE: ColorScheme = ColorScheme {
        debug: Rgb(106, 185, 112),
        info: Rgb(255, 255, 255),
        warn: Rgb(255, 203, 107),
        error: Rgb(255, 107, 107),
        fatal: Rgb(204, 62, 68),
    };

    pub fn get(&self, level: LogLevel) -> Option<Rgb> {
        match level {
            LogLevel::Debug => Some(self.debug),
            LogLevel::Info => Some(self.info),
            LogLevel::Warn => Some(self.warn),
            LogLevel::Error => Some(self.error),
            LogLevel::Fatal => Some(self.fatal),
            LogLevel::Quiet => None,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::BUILTIN
    }
}

/// Color each record's text by level.
///
/// Install it with [`Engine::install_shared_preprocessor`]; the escape codes
/// then show on the terminal while file channels stay plain.
///
/// [`Engine::install_shared_preprocessor`]: crate::core::Engine::install_shared_preprocessor
pub fn color_preprocessor(scheme: ColorScheme) -> Preprocessor {
    Arc::new(move |record: &mut Record| {
        if let Some(Rgb(r, g, b)) = scheme.get(record.level) {
            record.text = record.text.as_str().truecolor(r, g, b).to_string();
        }
        true
    })
}
