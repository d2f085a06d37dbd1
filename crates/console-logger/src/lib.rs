//! Console Logger
//!
//! `log` backend for the browser: records go to the devtools console and a
//! bounded ring buffer that pages can read back.

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Number of records kept in memory
pub const RECENT_CAPACITY: usize = 200;

/// A formatted log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// Render as a single console line
    pub fn line(&self) -> String {
        format!("{} [{} {}] {}", self.timestamp, self.level, self.target, self.message)
    }
}

/// Fixed-size buffer of the latest entries, oldest evicted first
#[derive(Debug)]
pub struct RecentLogs {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RecentLogs {
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct ConsoleLogger {
    recent: Mutex<RecentLogs>,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    recent: Mutex::new(RecentLogs::new(RECENT_CAPACITY)),
};

impl ConsoleLogger {
    /// Install the global logger. Calling it twice keeps the first install
    /// and only adjusts the level.
    pub fn init(level: LevelFilter) {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }
}

/// Parse a level name from configuration, falling back to `Info`
pub fn parse_level(name: Option<&str>) -> LevelFilter {
    name.and_then(|n| n.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Copy of the buffered records, oldest first
pub fn recent() -> Vec<LogEntry> {
    LOGGER
        .recent
        .lock()
        .map(|buf| buf.snapshot())
        .unwrap_or_default()
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        emit(&entry);
        if let Ok(mut buf) = self.recent.lock() {
            buf.push(entry);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&entry.line());
    match entry.level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(entry: &LogEntry) {
    eprintln!("{}", entry.line());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "00:00:00.000".to_string(),
            level: Level::Info,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_evicts_oldest() {
        let mut buf = RecentLogs::new(3);
        for i in 0..5 {
            buf.push(entry(&format!("m{}", i)));
        }
        let messages: Vec<_> = buf.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buf = RecentLogs::new(0);
        buf.push(entry("dropped"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("chatty")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }

    #[test]
    fn test_line_format() {
        let e = entry("hello");
        assert_eq!(e.line(), "00:00:00.000 [INFO test] hello");
    }
}
