//! Leveled log sinks
//!
//! Hashing code reports through a [`LogSink`] handed to it rather than a
//! global logger. Sinks swallow their own failures: a sink can never make a
//! hash operation fail.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Log target used for critical events, which `log` has no level for
pub const CRITICAL_TARGET: &str = "critical";

/// Severity of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// Closest `log` crate level
    pub fn as_log_level(&self) -> log::Level {
        match self {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error | LogLevel::Critical => log::Level::Error,
        }
    }

    pub fn as_level_filter(&self) -> log::LevelFilter {
        self.as_log_level().to_level_filter()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Destination for leveled log events
///
/// Implementations must be safe to call from many threads at once.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl LogSink for LogFacade {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Critical => log::error!(target: CRITICAL_TARGET, "{}", message),
            other => log::log!(other.as_log_level(), "{}", message),
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// A recorded log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps events in memory for later inspection
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.events
            .lock()
            .map(|events| events.iter().filter(|e| e.level == level).count())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, message: &str) {
        // A poisoned lock drops the event
        if let Ok(mut events) = self.events.lock() {
            events.push(LogEvent {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert!("verbose".parse::<LogLevel>().is_err());
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error < LogLevel::Critical);
        assert_eq!(LogLevel::Critical.as_log_level(), log::Level::Error);
    }

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        sink.debug("one");
        sink.warning("two");
        sink.critical("three");

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].level, LogLevel::Warning);
        assert_eq!(events[2].message, "three");
        assert_eq!(sink.count(LogLevel::Debug), 1);

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_shared_sink() {
        let sink = Arc::new(MemorySink::new());
        let shared: Arc<dyn LogSink> = sink.clone();
        shared.info("via arc");
        (&*sink).error("via ref");
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn test_noop_and_facade_do_not_panic() {
        NoopSink.critical("ignored");
        LogFacade.critical("no logger installed");
        LogFacade.debug("no logger installed");
    }
}
