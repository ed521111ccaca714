// Logging module - subscriber setup and in-memory log capture
//
// With `--trace` the preview captures log events in memory instead of
// writing them to stderr, then prints them after the recorded passes so the
// lifecycle's notifications line up with the frames they produced.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{LogRotation, LoggingConfig};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level.as_str(),
            self.target,
            self.message
        )
    }
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    /// Add a log entry to the buffer
    /// If the buffer is full, removes the oldest entry
    pub fn add(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Get all log entries (most recent last)
    pub fn get_all(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a [`LogBuffer`]
pub struct CaptureLayer {
    buffer: LogBuffer,
}

impl CaptureLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::from(metadata.level()),
            target: metadata.target().to_string(),
            message,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Visitor to extract the message from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Default directive when `RUST_LOG` is unset
pub fn default_filter(level: &str) -> String {
    format!("construct={0},construct_preview={0}", level)
}

/// Install the global subscriber
///
/// Logs go to stderr unless `capture` is given, in which case they land in
/// the buffer. File logging adds a JSON layer; the returned guard must live
/// until exit so buffered lines flush.
pub fn init(
    config: &LoggingConfig,
    capture: Option<LogBuffer>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    let (file_layer, guard) = if config.file_enabled {
        std::fs::create_dir_all(&config.file_dir)?;
        let appender = match config.file_rotation {
            LogRotation::Hourly => {
                tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
            }
            LogRotation::Daily => {
                tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
            }
            LogRotation::Never => {
                tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
            }
        };
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let stderr_layer = capture
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(capture.map(CaptureLayer::new))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn capture_layer_records_message_and_level() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(CaptureLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Hook faulted: {}", "boom");
            tracing::debug!(phase = "init", "Initializing");
        });

        let entries = buffer.get_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "Hook faulted: boom");
        assert_eq!(entries[1].level, LogLevel::Debug);
        assert_eq!(entries[1].message, "Initializing");
    }

    #[test]
    fn buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::new();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            buffer.add(LogEntry {
                timestamp: Utc::now(),
                level: LogLevel::Info,
                target: "test".to_string(),
                message: i.to_string(),
            });
        }

        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);
        assert_eq!(buffer.get_all()[0].message, "5");
    }

    #[test]
    fn default_filter_covers_library_and_binary() {
        assert_eq!(
            default_filter("debug"),
            "construct=debug,construct_preview=debug"
        );
    }
}
