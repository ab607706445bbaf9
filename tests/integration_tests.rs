//! Integration tests for the logging engine
//!
//! These tests verify:
//! - End-to-end delivery to file channels
//! - Level filtering
//! - Global FIFO ordering across producer threads
//! - Channel table capacity and failure handling
//! - Shutdown draining
//! - Preprocessed output to the console and streams, raw output to files

use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use threaded_logger::prelude::*;

fn capture() -> Arc<Mutex<Vec<u8>>> {
    shared_stream(Vec::<u8>::new())
}

fn contents(sink: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(sink.lock().clone()).expect("log output is UTF-8")
}

fn wait_for_delivery(engine: &Engine, count: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while engine.metrics().delivered() < count {
        assert!(Instant::now() < deadline, "worker did not deliver {} records", count);
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_end_to_end_file_channel() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("out.log");

    let engine = Engine::builder().stdout(false).build();
    let id = engine.add_file(&log_file).expect("Failed to add file channel");
    assert_eq!(id.index(), 1);

    let signature = Signature::new(&engine, "mod");
    signature.info().append("hello ").append(42);
    assert!(engine.shutdown());

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let line = lines[0];
    assert!(line.ends_with("hello 42"));
    // [YYYY/MM/DD hh:mm:ss] [INFO] [mod] hello 42
    assert_eq!(&line[0..1], "[");
    assert_eq!(&line[20..22], "] ");
    assert_eq!(&line[5..6], "/");
    assert_eq!(&line[8..9], "/");
    assert!(line[22..].starts_with("[INFO] [mod] "));
}

#[test]
fn test_level_filtering() {
    let filters = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Quiet,
    ];

    for filter in filters {
        let sink = capture();
        let engine = Engine::builder().stdout(false).filter_level(filter).build();
        engine.add_stream(sink.clone()).unwrap();
        let signature = engine.signature("filter");

        for level in LogLevel::RECORD_LEVELS {
            signature.session(level).append(level);
        }
        engine.shutdown();

        let output = contents(&sink);
        for level in LogLevel::RECORD_LEVELS {
            let present = output.contains(&format!("{} [filter] {}", level.label(), level));
            assert_eq!(
                present,
                level >= filter,
                "level {} with filter {}",
                level,
                filter
            );
        }
    }
}

#[test]
fn test_filter_change_applies_to_later_sessions() {
    let sink = capture();
    let engine = Engine::builder().stdout(false).build();
    engine.add_stream(sink.clone()).unwrap();
    let signature = engine.signature("dyn");

    signature.debug().append("first");
    engine.set_filter_level(LogLevel::Error);
    signature.debug().append("second");
    signature.error().append("third");
    engine.shutdown();

    let output = contents(&sink);
    assert!(output.contains("first"));
    assert!(!output.contains("second"));
    assert!(output.contains("third"));
}

#[test]
fn test_fifo_per_producer_thread() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let sink = capture();
    let engine = Arc::new(Engine::builder().stdout(false).build());
    engine.add_stream(sink.clone()).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let signature = engine.signature(format!("t{}", t));
                for seq in 0..PER_THREAD {
                    signature.info().append(seq);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer panicked");
    }
    engine.shutdown();

    let output = contents(&sink);
    let mut last_seen = vec![None::<usize>; THREADS];
    let mut total = 0;
    for line in output.lines() {
        let tag_start = line.find("[t").expect("tag present") + 2;
        let tag_end = tag_start + line[tag_start..].find(']').unwrap();
        let thread: usize = line[tag_start..tag_end].parse().unwrap();
        let seq: usize = line[tag_end + 2..].parse().unwrap();

        if let Some(previous) = last_seen[thread] {
            assert!(seq > previous, "thread {} out of order: {} after {}", thread, seq, previous);
        }
        last_seen[thread] = Some(seq);
        total += 1;
    }
    assert_eq!(total, THREADS * PER_THREAD);
}

#[test]
fn test_channel_table_capacity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let engine = Engine::builder().stdout(false).build();

    let ids: Vec<ChannelId> = (1..CHANNEL_CAPACITY)
        .map(|i| engine.add_file(temp_dir.path().join(format!("{}.log", i))).unwrap())
        .collect();
    assert_eq!(ids.last().unwrap().index(), CHANNEL_CAPACITY - 1);

    let overflow = temp_dir.path().join("overflow.log");
    assert!(matches!(
        engine.add_file(&overflow),
        Err(LoggerError::ChannelTableFull { .. })
    ));
    assert!(matches!(
        engine.add_stream(capture()),
        Err(LoggerError::ChannelTableFull { .. })
    ));
    assert!(!overflow.exists());

    for id in &ids {
        assert!(engine.is_channel_valid(*id));
        assert_eq!(engine.channel_kind(*id), ChannelKind::File);
    }

    engine.signature("all").warn().append("fan out");
    engine.shutdown();

    for i in 1..CHANNEL_CAPACITY {
        let content = fs::read_to_string(temp_dir.path().join(format!("{}.log", i))).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}

#[test]
fn test_shutdown_delivers_everything_pushed_before() {
    const RECORDS: usize = 1_000;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("drain.log");
    let engine = Engine::builder().stdout(false).file(&log_file).build();
    let signature = engine.signature("drain");

    for i in 0..RECORDS {
        signature.info().append("record ").append(i);
    }
    assert!(engine.shutdown());
    assert_eq!(engine.state(), EngineState::Stopped);

    signature.info().append("after shutdown");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), RECORDS);
    assert!(!content.contains("after shutdown"));
    assert_eq!(engine.metrics().delivered(), RECORDS as u64);
    assert_eq!(engine.metrics().rejected(), 1);
}

#[test]
fn test_set_stdout_false_excludes_later_records() {
    let console = capture();
    let engine = Engine::builder().console_stream(console.clone()).build();
    let signature = engine.signature("console");

    signature.info().append("visible");
    wait_for_delivery(&engine, 1);

    engine.set_stdout(false);
    signature.info().append("hidden");
    engine.shutdown();

    let output = contents(&console);
    assert_eq!(output.lines().count(), 1);
    assert!(output.contains("visible"));
    assert!(!output.contains("hidden"));
}

#[test]
fn test_preprocessor_applies_to_console_and_streams_but_not_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("plain.log");
    let console = capture();
    let stream = capture();

    let engine = Engine::builder()
        .console_stream(console.clone())
        .file(&log_file)
        .build();
    engine.add_stream(stream.clone()).unwrap();
    engine.install_preprocessor(|record: &mut Record| {
        record.text = format!("<<{}>>", record.text);
        true
    });

    engine.signature("pp").error().append("payload");
    engine.shutdown();

    let console_output = contents(&console);
    let stream_output = contents(&stream);
    let file_output = fs::read_to_string(&log_file).unwrap();

    assert!(console_output.contains("<<[ERROR] [pp] payload>>"));
    assert!(stream_output.contains("<<[ERROR] [pp] payload>>"));
    assert!(file_output.contains("[ERROR] [pp] payload"));
    assert!(!file_output.contains("<<"));
    assert!(!file_output.contains(">>"));
}

#[cfg(feature = "color")]
#[test]
fn test_color_preprocessor_keeps_files_plain() {
    colored::control::set_override(true);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("color.log");
    let console = capture();

    let engine = Engine::builder()
        .console_stream(console.clone())
        .file(&log_file)
        .build();
    engine.install_shared_preprocessor(color_preprocessor(ColorScheme::VSCODE));

    engine.signature("c").warn().append("careful");
    engine.shutdown();

    assert!(contents(&console).contains('\x1b'));
    assert!(!fs::read_to_string(&log_file).unwrap().contains('\x1b'));
}

#[test]
fn test_external_stream_is_not_closed() {
    let stream = capture();
    let engine = Engine::builder().stdout(false).build();
    let id = engine.add_stream(stream.clone()).unwrap();
    assert_eq!(engine.channel_kind(id), ChannelKind::Stream);

    engine.signature("s").info().append("owned elsewhere");
    engine.shutdown();

    assert_eq!(Arc::strong_count(&stream), 1);
    stream.lock().extend_from_slice(b"owner writes on\n");
    let output = contents(&stream);
    assert!(output.contains("owned elsewhere"));
    assert!(output.ends_with("owner writes on\n"));
}

#[test]
fn test_failing_channel_is_dropped_without_affecting_others() {
    struct FlakyWriter {
        attempts: Arc<AtomicUsize>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let attempts = Arc::new(AtomicUsize::new(0));
    let healthy = capture();
    let engine = Engine::builder().stdout(false).build();
    let flaky = engine
        .add_stream(shared_stream(FlakyWriter {
            attempts: Arc::clone(&attempts),
        }))
        .unwrap();
    engine.add_stream(healthy.clone()).unwrap();

    let signature = engine.signature("io");
    for i in 0..5 {
        signature.info().append(i);
    }
    wait_for_delivery(&engine, 5);

    assert!(!engine.is_channel_valid(flaky));
    engine.shutdown();

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(engine.metrics().channel_failures(), 1);
    assert_eq!(contents(&healthy).lines().count(), 5);
}

#[test]
fn test_claimed_thread_name_tags_lines() {
    let sink = capture();
    let engine = Arc::new(Engine::builder().stdout(false).build());
    engine.add_stream(sink.clone()).unwrap();
    let signature = engine.signature("sig");

    signature.info().append("from main");
    let worker = {
        let engine = Arc::clone(&engine);
        let signature = signature.clone();
        std::thread::spawn(move || {
            engine.claim_thread_name("uploader");
            signature.info().append("from uploader");
        })
    };
    worker.join().unwrap();
    engine.shutdown();

    let output = contents(&sink);
    assert!(output.contains("[INFO] [sig] from main"));
    assert!(output.contains("[INFO] [uploader] from uploader"));
}

#[test]
fn test_super_timestamp_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("precise.log");
    let engine = Engine::builder()
        .stdout(false)
        .super_timestamp(true)
        .file(&log_file)
        .build();

    engine.signature("t").info().append("tick");
    engine.shutdown();

    let content = fs::read_to_string(&log_file).unwrap();
    let line = content.lines().next().unwrap();
    // [YYYY/MM/DD hh:mm:ss.mmm.uuu] [INFO] [t] tick
    assert_eq!(&line[28..30], "] ");
    assert!(line[21..24].chars().all(|c| c.is_ascii_digit()));
    assert!(line[25..28].chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_files_append_across_engines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("runs.log");

    for run in 0..3 {
        let engine = Engine::builder().stdout(false).file(&log_file).build();
        engine.signature("run").info().append("run ").append(run);
    }

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].ends_with("run 2"));
}

#[test]
fn test_signature_channel_selection() {
    let audit = capture();
    let general = capture();
    let engine = Engine::builder().stdout(false).build();
    let audit_id = engine.add_stream(audit.clone()).unwrap();
    let general_id = engine.add_stream(general.clone()).unwrap();

    let mut auditor = engine.signature("audit");
    auditor.detach_channel(general_id);
    let mut app = engine.signature("app");
    app.detach_channel(audit_id);

    auditor.info().append("login alice");
    app.info().append("request served");
    engine.shutdown();

    assert!(contents(&audit).contains("login alice"));
    assert!(!contents(&audit).contains("request served"));
    assert!(contents(&general).contains("request served"));
    assert!(!contents(&general).contains("login alice"));
}

#[test]
fn test_engine_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");
    let config = EngineConfig::from_json(&format!(
        r#"{{"filter_level": "warn", "stdout": false, "files": [{}]}}"#,
        serde_json_string(&log_file.to_string_lossy())
    ))
    .unwrap();

    let engine = Engine::with_config(&config).unwrap();
    let signature = engine.signature("cfg");
    signature.info().append("ignored");
    signature.warn().append("kept");
    engine.shutdown();

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("[WARN] [cfg] kept"));
}

fn serde_json_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
