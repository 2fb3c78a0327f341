//! Pipeline log helpers.
//!
//! Stages report progress through these helpers instead of printing. Entries
//! become `tracing` events; the binary decides where they go.

use tracing::{debug, error, info, warn};

/// Log level of a pipeline message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting level for sub-steps
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Message as it is printed, with indent and level marker.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Debug | LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠ ",
            LogLevel::Error => "✗ ",
        };
        format!("{}{}{}", "   ".repeat(self.indent as usize), prefix, self.message)
    }

    /// Emit as a tracing event.
    pub fn emit(&self) {
        let line = self.render();
        match self.level {
            LogLevel::Debug => debug!("{}", line),
            LogLevel::Info | LogLevel::Success => info!("{}", line),
            LogLevel::Warning => warn!("{}", line),
            LogLevel::Error => error!("{}", line),
        }
    }
}

/// Convenient logging functions
pub fn log_debug(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Debug, msg).emit();
}

pub fn log_info(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Info, msg).emit();
}

pub fn log_success(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Success, msg).emit();
}

pub fn log_warning(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Warning, msg).emit();
}

pub fn log_error(msg: impl Into<String>) {
    LogEntry::new(LogLevel::Error, msg).emit();
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LogEntry::new(LogLevel::Info, msg).with_indent(indent).emit();
}

pub fn log_success_indent(msg: impl Into<String>, indent: u8) {
    LogEntry::new(LogLevel::Success, msg).with_indent(indent).emit();
}
