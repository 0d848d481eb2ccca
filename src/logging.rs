//! Diagnostic log for the request path.
//!
//! Each entry is appended as one JSON line to the log file. The entries
//! written by this process are also kept in a bounded ring for inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

const RECENT_CAPACITY: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

struct Sink {
    recent: VecDeque<LogEntry>,
    file: Option<BufWriter<File>>,
}

impl Sink {
    fn record(&mut self, entry: LogEntry) {
        if let Some(file) = self.file.as_mut() {
            if let Ok(line) = serde_json::to_string(&entry) {
                let _ = writeln!(file, "{line}");
                let _ = file.flush();
            }
        }
        if self.recent.len() == RECENT_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(entry);
    }
}

/// Cloneable handle shared by the router and the gateway handler.
#[derive(Clone)]
pub struct SharedLogger(Arc<Mutex<Sink>>);

impl SharedLogger {
    /// Append to (or create) a JSONL file.
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file_path = file_path.as_ref();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(file_path)?;
        Ok(Self::with_file(Some(BufWriter::new(file))))
    }

    /// Nothing touches disk.
    pub fn in_memory() -> Self {
        Self::with_file(None)
    }

    fn with_file(file: Option<BufWriter<File>>) -> Self {
        Self(Arc::new(Mutex::new(Sink {
            recent: VecDeque::new(),
            file,
        })))
    }

    pub fn log_with_context(
        &self,
        level: LogLevel,
        component: &str,
        message: impl Into<String>,
        context: serde_json::Value,
    ) {
        self.record(level, component, message.into(), Some(context));
    }

    pub fn info(&self, component: &str, message: impl Into<String>) {
        self.record(LogLevel::Info, component, message.into(), None);
    }

    pub fn warn(&self, component: &str, message: impl Into<String>) {
        self.record(LogLevel::Warn, component, message.into(), None);
    }

    pub fn error(&self, component: &str, message: impl Into<String>) {
        self.record(LogLevel::Error, component, message.into(), None);
    }

    fn record(
        &self,
        level: LogLevel,
        component: &str,
        message: String,
        context: Option<serde_json::Value>,
    ) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            component: component.to_string(),
            message,
            context,
        };
        if let Ok(mut sink) = self.0.lock() {
            sink.record(entry);
        }
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.0
            .lock()
            .map(|s| s.recent.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}
