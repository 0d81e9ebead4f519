//! I/O boundary traits for testability
//!
//! These traits abstract reading input, writing output and surfacing
//! messages, allowing services to be tested with in-memory implementations.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use colored::Colorize;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// User-facing message sink (the host's notification area).
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Colored notifications on stderr, keeping stdout for converted output.
///
/// Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    pub show_info: bool,
    pub show_errors: bool,
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self {
            show_info: true,
            show_errors: true,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        if self.show_info {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{}: {}", "Warning".yellow(), message);
    }

    fn error(&self, message: &str) {
        if self.show_errors {
            eprintln!("{}: {}", "error".red().bold(), message);
        }
    }
}

// ============================================================
// RECORDING IMPLEMENTATION
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Keeps every notification in memory, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    fn record(&self, level: NoticeLevel, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.record(NoticeLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(NoticeLevel::Error, message);
    }
}
