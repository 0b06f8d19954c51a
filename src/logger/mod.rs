//! Structured logging for the collection browser.
//!
//! Tag-based console logging with standard levels and per-module debug
//! gating via `--debug <module>` flags:
//!
//! ```rust
//! use gvcbrowser::logger::{self, LogTag};
//!
//! logger::info(LogTag::Listings, "refresh complete");
//! logger::debug(LogTag::Facets, "index built"); // only with --debug facets
//! ```
//!
//! Call [`init`] once at startup before any logging occurs.

mod config;
mod format;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};

/// Log levels ordered by severity. Errors are always shown; Debug and
/// Verbose are gated by flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Verbose = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ERROR" => Some(LogLevel::Error),
            "WARNING" | "WARN" => Some(LogLevel::Warning),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "VERBOSE" | "TRACE" => Some(LogLevel::Verbose),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Module tags for log filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    Config,
    Dataset,
    Badges,
    Facets,
    Filter,
    Search,
    Listings,
    Gallery,
    System,
}

impl LogTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Config => "CONFIG",
            LogTag::Dataset => "DATASET",
            LogTag::Badges => "BADGES",
            LogTag::Facets => "FACETS",
            LogTag::Filter => "FILTER",
            LogTag::Search => "SEARCH",
            LogTag::Listings => "LISTINGS",
            LogTag::Gallery => "GALLERY",
            LogTag::System => "SYSTEM",
        }
    }

    /// Key used by `--debug <module>` flags.
    pub fn debug_key(&self) -> &'static str {
        match self {
            LogTag::Config => "config",
            LogTag::Dataset => "dataset",
            LogTag::Badges => "badges",
            LogTag::Facets => "facets",
            LogTag::Filter => "filter",
            LogTag::Search => "search",
            LogTag::Listings => "listings",
            LogTag::Gallery => "gallery",
            LogTag::System => "system",
        }
    }
}

/// Initialize the logger from parsed CLI flags. Call once at startup.
pub fn init(debug_modules: &[String], verbose: bool, quiet: bool) {
    config::init_from_flags(debug_modules, verbose, quiet);
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !config::should_log(&tag, level) {
        return;
    }
    format::write_line(tag, level, message);
}

/// Log at ERROR level (always shown).
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level.
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level.
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level. Only shown with `--debug <module>` for this tag.
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level. Only shown with `--verbose`.
pub fn verbose(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Verbose, message);
}
