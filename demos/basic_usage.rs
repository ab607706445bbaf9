//! Basic engine usage example
//!
//! Demonstrates console logging through a signature at different levels,
//! the level filter and the color preprocessor.
//!
//! Run with: cargo run --example basic_usage

use threaded_logger::prelude::*;
use threaded_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Threaded Logger - Basic Usage Example ===\n");

    let engine = Engine::builder().filter_level(LogLevel::Debug).try_build()?;
    engine.install_shared_preprocessor(color_preprocessor(ColorScheme::BUILTIN));
    engine.claim_thread_name("main");

    let app = engine.signature("app");

    // Each session commits one record at the end of its statement
    app.debug().append("This is a debug message");
    app.info().append("This is an info message");
    app.warn().append("This is a warning message");
    app.error().append("This is an error message");
    app.fatal().append("This is a fatal message");

    engine.set_filter_level(LogLevel::Info);
    app.debug().append("Debug message (hidden)");
    info!(app, "Info message with {} argument", 1);
    warn!(app, "Retry {} of {}", 2, 3);

    engine.enable_super_timestamp(true);
    app.info().append("High precision timestamp");

    engine.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
