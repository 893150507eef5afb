//! Subscriber installation, checked through an in-memory writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crm_cli::logging::{LogConfig, LogFormat, init_logging_with_writer, redact_value};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

struct BufferGuard(Arc<Mutex<Vec<u8>>>);

impl Write for BufferGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = BufferGuard;

    fn make_writer(&'a self) -> Self::Writer {
        BufferGuard(Arc::clone(&self.0))
    }
}

#[test]
fn json_logs_keep_workspace_events_and_redact_values() {
    let buffer = Buffer::default();
    let config = LogConfig {
        level_filter: LevelFilter::INFO,
        use_env_filter: false,
        with_ansi: false,
        format: LogFormat::Json,
        ..LogConfig::default()
    };
    init_logging_with_writer(&config, buffer.clone()).unwrap();

    tracing::info!(target: "crm_core::pipeline", rows = 3, "import complete");
    tracing::debug!(target: "crm_core::pipeline", "row detail");
    tracing::info!(target: "some_dependency", "dependency chatter");
    tracing::warn!(
        target: "crm_cli",
        value = redact_value("jane@example.com"),
        "suspicious value"
    );

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["fields"]["message"], "import complete");
    assert_eq!(lines[0]["fields"]["rows"], 3);
    assert_eq!(lines[1]["fields"]["value"], "[REDACTED]");
    assert!(!output.contains("jane@example.com"));

    // A second subscriber cannot be installed.
    assert!(init_logging_with_writer(&config, buffer).is_err());
}
