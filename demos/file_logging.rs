//! File logging example
//!
//! Demonstrates logging to the console and a file channel simultaneously,
//! with colors kept out of the file.
//!
//! Run with: cargo run --example file_logging

use threaded_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Threaded Logger - File Logging Example ===\n");

    let engine = Engine::builder().try_build()?;
    engine.install_shared_preprocessor(color_preprocessor(ColorScheme::VSCODE));

    let channel = engine.add_file("application.log")?;
    println!("File channel registered as #{}", channel);

    let app = engine.signature("app");
    let db = engine.signature("db");

    app.info().append("Application started");
    db.info().append("Connecting to database...");
    db.warn().append("Using default pool size");

    let workers: Vec<_> = (1..=3)
        .map(|n| {
            let app = app.clone();
            let label = format!("worker-{}", n);
            std::thread::spawn(move || {
                for i in 1..=3 {
                    app.info().append(&label).append(" processed item ").append(i);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked");
    }

    app.info().append("All operations completed");

    // Drains the queue and closes the file
    engine.shutdown();

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the uncolored log output");

    Ok(())
}
