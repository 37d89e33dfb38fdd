use derive_more::Display;
use std::sync::{Mutex, OnceLock};

/// Log levels with automatic Display implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer + component that produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// Structured log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.to_string(),
            fields: Vec::new(),
        }
    }

    /// Attach a key/value pair rendered after the message.
    pub fn with_field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// `[ts] LEVEL COMPONENT | message | k=v k=v`
    pub fn format_line(&self, timestamp: &str) -> String {
        let mut line = format!(
            "[{}] {} {} | {}",
            timestamp, self.level, self.component, self.message
        );
        if !self.fields.is_empty() {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            line.push_str(" | ");
            line.push_str(&fields.join(" "));
        }
        line
    }
}

/// Domain abstraction for time service
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Domain abstraction for structured logging
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn trace(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Trace, component, message));
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger + Sync + Send>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider + Sync + Send>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger + Sync + Send>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Install the process-wide time source. Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider + Sync + Send>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER
        .get()
        .map(|logger| logger.as_ref())
        .unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&SequenceTimeProvider)
}

struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}
}

/// Monotonic counter used until a real clock is installed (native tests, early startup).
struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

/// Logger that keeps entries in memory, for tests and diagnostics panels.
#[derive(Default)]
pub struct RecordingLogger {
    min_level: Option<LogLevel>,
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level: Some(min_level), entries: Mutex::new(Vec::new()) }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, entry: LogEntry) {
        if self.min_level.is_some_and(|min| entry.level < min) {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().trace($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().debug($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::get_logger().info($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().warn($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().error($component, &format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_line_appends_fields() {
        let entry = LogEntry {
            timestamp: 7,
            level: LogLevel::Info,
            component: LogComponent::Domain("DomainFreezer"),
            message: "frozen".into(),
            fields: Vec::new(),
        }
        .with_field("dataset", "ex-1")
        .with_field("points", 3);

        assert_eq!(
            entry.format_line("000007"),
            "[000007]  INFO DOM:DomainFreezer | frozen | dataset=ex-1 points=3"
        );
    }

    #[test]
    fn recording_logger_filters_by_level() {
        let logger = RecordingLogger::new(LogLevel::Warn);
        logger.debug(LogComponent::Application("Session"), "ignored");
        logger.warn(LogComponent::Application("Session"), "kept");
        logger.error(LogComponent::Application("Session"), "kept too");

        assert_eq!(logger.entries().len(), 2);
        assert_eq!(logger.messages_at(LogLevel::Warn), vec!["kept".to_string()]);
    }
}
