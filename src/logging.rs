//! In-memory log capture for the TUI log pane, and the stderr subscriber
//! used by print mode.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Entries kept before the oldest are dropped
const LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub logged_at: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            logged_at: Local::now(),
            level,
            target: target.to_string(),
            message,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.logged_at.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Bounded, shareable log history. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl Default for LogRingBuffer {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl LogRingBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn record(&self, entry: LogEntry) {
        // A poisoned lock only means another thread panicked mid-record
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest `count` entries, oldest first
    pub fn tail(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }
}

/// Parse one compact-format line ("LEVEL target: message") into an entry
fn parse_compact_line(line: &str) -> LogEntry {
    let levels = [
        ("TRACE ", Level::TRACE),
        ("DEBUG ", Level::DEBUG),
        ("INFO ", Level::INFO),
        ("WARN ", Level::WARN),
        ("ERROR ", Level::ERROR),
    ];

    let Some((level, rest)) = levels
        .iter()
        .find_map(|(prefix, level)| line.strip_prefix(prefix).map(|rest| (*level, rest.trim_start())))
    else {
        return LogEntry::new(Level::INFO, "general", line.to_string());
    };

    // A target never contains spaces
    match rest.split_once(':') {
        Some((target, msg)) if !target.contains(' ') => {
            LogEntry::new(level, target, msg.trim().to_string())
        }
        _ => LogEntry::new(level, "general", rest.to_string()),
    }
}

/// Custom writer that captures logs to our ring buffer
#[derive(Clone)]
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl RingBufferWriter {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            for line in message.lines().map(str::trim).filter(|l| !l.is_empty()) {
                self.buffer.record(parse_compact_line(line));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RingBufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOG_BUFFER: OnceLock<LogRingBuffer> = OnceLock::new();

/// Initialize tracing into the in-memory ring buffer, for use while the
/// terminal is owned by the TUI
pub fn init_tracing() -> LogRingBuffer {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let buffer = LOG_BUFFER.get_or_init(LogRingBuffer::default).clone();
    let writer = RingBufferWriter::new(buffer.clone());

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .without_time()
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Ignore a second initialization (tests, repeated runs in one process)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(target: "system", "Tracing initialized");
    buffer
}

/// Initialize tracing to stderr for non-interactive runs
pub fn init_stderr_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_line() {
        let entry = parse_compact_line("DEBUG sort: Column 1 sorted Ascending");
        assert_eq!(entry.level, Level::DEBUG);
        assert_eq!(entry.target, "sort");
        assert_eq!(entry.message, "Column 1 sorted Ascending");

        let entry = parse_compact_line("INFO no target here: x");
        assert_eq!(entry.target, "general");

        let entry = parse_compact_line("plain text");
        assert_eq!(entry.level, Level::INFO);
        assert_eq!(entry.message, "plain text");
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let buffer = LogRingBuffer::with_capacity(3);
        for i in 0..5 {
            buffer.record(LogEntry::new(Level::INFO, "test", i.to_string()));
        }
        let kept: Vec<String> = buffer.tail(10).into_iter().map(|e| e.message).collect();
        assert_eq!(kept, vec!["2", "3", "4"]);
        assert_eq!(buffer.tail(1)[0].message, "4");
    }

    #[test]
    fn test_entry_display() {
        let entry = LogEntry::new(Level::WARN, "sort", "Ignoring column 9".to_string());
        assert!(entry.to_string().ends_with(" WARN sort: Ignoring column 9"));
    }
}
