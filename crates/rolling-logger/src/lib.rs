//! Rolling Logger
//!
//! A `tracing` subscriber that keeps the most recent log lines in a circular
//! buffer and forwards each line to a pluggable sink (the browser console in
//! the front end). `log` macros are bridged into the same subscriber.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Local;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

pub use tracing::Level;
pub use tracing_subscriber::filter::LevelFilter;

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// Output for each formatted line
pub type Sink = Arc<dyn Fn(Level, &str) + Send + Sync>;

static GLOBAL: OnceLock<LogHandle> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger not initialized")]
    NotInitialized,
}

/// One captured line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:>5} {}: {}", self.timestamp, self.level, self.target, self.message)
    }
}

/// Logger settings
#[derive(Clone)]
pub struct LoggerConfig {
    pub capacity: usize,
    pub level: LevelFilter,
    pub sink: Option<Sink>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            level: LevelFilter::INFO,
            sink: None,
        }
    }
}

impl LoggerConfig {
    pub fn with_sink(mut self, sink: impl Fn(Level, &str) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }
}

/// Read access to the circular buffer
#[derive(Clone)]
pub struct LogHandle {
    app_name: String,
    buffer: Arc<Mutex<VecDeque<LogLine>>>,
}

impl LogHandle {
    /// Buffered lines, oldest first
    pub fn recent(&self) -> Vec<LogLine> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// Layer that formats events into [`LogLine`]s
pub struct RollingLayer {
    buffer: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(app_name: &str, capacity: usize, sink: Option<Sink>) -> (Self, LogHandle) {
        let buffer = Arc::new(Mutex::new(VecDeque::with_capacity(capacity)));
        let layer = Self {
            buffer: buffer.clone(),
            capacity: capacity.max(1),
            sink,
        };
        let handle = LogHandle {
            app_name: app_name.to_string(),
            buffer,
        };
        (layer, handle)
    }

    fn push(&self, line: LogLine) {
        if let Some(sink) = &self.sink {
            sink(line.level, &line.to_string());
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            while buffer.len() >= self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(line);
        }
    }
}

/// Collects the message and, for events bridged from `log`, the original target
#[derive(Default)]
struct LineVisitor {
    message: String,
    log_target: Option<String>,
    extra: Vec<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => self.extra.push(format!("{}={}", name, value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            name if name.starts_with("log.") => {}
            name => self.extra.push(format!("{}={:?}", name, value)),
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let mut message = visitor.message;
        if !visitor.extra.is_empty() {
            if !message.is_empty() {
                message.push(' ');
            }
            message.push_str(&visitor.extra.join(" "));
        }

        self.push(LogLine {
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            level: *event.metadata().level(),
            target: visitor
                .log_target
                .unwrap_or_else(|| event.metadata().target().to_string()),
            message,
        });
    }
}

/// Install the global subscriber and the `log` bridge.
pub fn init_logger(app_name: &str, config: LoggerConfig) -> Result<LogHandle, LoggerError> {
    if GLOBAL.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let (layer, handle) = RollingLayer::new(app_name, config.capacity, config.sink);
    Registry::default()
        .with(layer.with_filter(config.level))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    GLOBAL
        .set(handle.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(target: "rolling_logger", "{} logger ready ({} lines kept)", app_name, config.capacity);
    Ok(handle)
}

fn app_target() -> Result<&'static str, LoggerError> {
    GLOBAL
        .get()
        .map(|h| h.app_name.as_str())
        .ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    let app = app_target()?;
    tracing::info!(app, "{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    let app = app_target()?;
    tracing::warn!(app, "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    let app = app_target()?;
    tracing::error!(app, "{}", message);
    Ok(())
}
