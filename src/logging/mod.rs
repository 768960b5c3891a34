//! Structured logging for the grid runtime.
//!
//! Records are [`LogEvent`]s handed to a [`LogSink`]. [`FileSink`] appends
//! JSON lines to a size-capped file; [`QueueSink`] feeds a channel that a
//! [`LogWindow`] drains into a window on screen.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crossbeam_channel::{Receiver, Sender};
use crossterm::style::Color;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::surface::{Attr, Screen, Style, WindowId};
use crate::width::strip_ansi;

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Style used when the level is shown in a window.
    pub fn style(self) -> Style {
        match self {
            LogLevel::Trace => Style::new().attr(Attr::DIM),
            LogLevel::Debug => Style::new().fg(Color::Cyan),
            LogLevel::Info => Style::new(),
            LogLevel::Warn => Style::new().fg(Color::Yellow),
            LogLevel::Error => Style::new().fg(Color::Red).attr(Attr::BOLD),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }

    /// One-line rendering: level, target, message, then `key=value` fields.
    pub fn line(&self) -> String {
        let mut line = format!("{:<5} {} {}", self.level, self.target, self.message);
        for (key, value) in &self.fields {
            match value {
                Value::String(text) => line.push_str(&format!(" {key}={text}")),
                other => line.push_str(&format!(" {key}={other}")),
            }
        }
        line
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("log writer mutex poisoned")]
    Poisoned,
    #[error("log queue disconnected")]
    Disconnected,
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Cheap-to-clone handle to a sink, dropping records below `min_level`.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_level: LogLevel::Trace,
        }
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_with_fields(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: LogFields,
    ) -> LoggingResult<()> {
        self.log_event(LogEvent::with_fields(level, target, message, fields))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if !self.enabled(event.level) {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line(&self, mut line: String) -> LoggingResult<()> {
        line.push('\n');
        let mut guard = self.writer.lock().map_err(|_| LoggingError::Poisoned)?;

        if self.should_rotate(guard.get_ref(), line.len() as u64)? {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?;
            *guard = BufWriter::new(file);
        }

        guard.write_all(line.as_bytes())?;
        guard.flush()?;
        Ok(())
    }

    fn should_rotate(&self, file: &File, incoming_len: u64) -> std::io::Result<bool> {
        if self.max_bytes == 0 {
            return Ok(false);
        }
        let current = file.metadata()?.len();
        Ok(current + incoming_len > self.max_bytes)
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let line = serde_json::to_string(event)?;
        self.write_line(line)
    }
}

/// Sink that queues records for another thread or for a [`LogWindow`].
#[derive(Clone)]
pub struct QueueSink {
    sender: Sender<LogEvent>,
}

impl QueueSink {
    pub fn new() -> (Self, Receiver<LogEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl LogSink for QueueSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.sender
            .send(event.clone())
            .map_err(|_| LoggingError::Disconnected)
    }
}

/// Drains queued records into a scrolling window, one line per record.
pub struct LogWindow {
    receiver: Receiver<LogEvent>,
    window: WindowId,
}

impl LogWindow {
    pub fn new(receiver: Receiver<LogEvent>, window: WindowId) -> Self {
        Self { receiver, window }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Point at a new window, e.g. after the grid was rebuilt.
    pub fn retarget(&mut self, window: WindowId) {
        self.window = window;
    }

    /// Write every queued record into the window and return how many were
    /// written. Records queued while the window is gone are kept.
    pub fn drain(&self, screen: &mut Screen) -> crate::error::Result<usize> {
        let window = screen.window_mut(self.window)?;
        window.scrollok(true);
        let mut written = 0;
        for event in self.receiver.try_iter() {
            let (y, x) = window.getyx();
            if y > 0 || x > 0 {
                window.addstr("\n", Style::new())?;
            }
            window.addstr(&strip_ansi(&event.line()), event.level.style())?;
            written += 1;
        }
        Ok(written)
    }
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    LogEvent::with_fields(level, target, message, fields.into_iter().collect())
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

pub fn json_str(key: &str, value: impl Into<String>) -> (String, Value) {
    (key.to_string(), json!(value.into()))
}
