//! Logger configuration with thread-safe global access.

use std::collections::HashSet;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use super::{LogLevel, LogTag};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level shown (errors bypass this).
    pub min_level: LogLevel,
    /// Debug keys enabled via `--debug <module>`.
    pub debug_modules: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_modules: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

pub(super) fn init_from_flags(debug_modules: &[String], verbose: bool, quiet: bool) {
    let min_level = if verbose {
        LogLevel::Verbose
    } else if !debug_modules.is_empty() {
        LogLevel::Debug
    } else if quiet {
        LogLevel::Warning
    } else {
        LogLevel::Info
    };

    set_logger_config(LoggerConfig {
        min_level,
        debug_modules: debug_modules
            .iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect(),
    });
}

/// Filtering rules:
/// 1. Errors always log.
/// 2. Everything else must pass the minimum level threshold.
/// 3. Debug additionally requires the tag's module flag, unless running
///    fully verbose.
pub(super) fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    let config = get_logger_config();
    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug && config.min_level != LogLevel::Verbose {
        return config.debug_modules.contains(tag.debug_key())
            || config.debug_modules.contains("all");
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_always_pass() {
        set_logger_config(LoggerConfig {
            min_level: LogLevel::Warning,
            debug_modules: HashSet::new(),
        });
        assert!(should_log(&LogTag::Listings, LogLevel::Error));
        assert!(!should_log(&LogTag::Listings, LogLevel::Info));
        set_logger_config(LoggerConfig::default());
    }

    #[test]
    fn debug_requires_module_flag() {
        init_from_flags(&["facets".to_string()], false, false);
        assert!(should_log(&LogTag::Facets, LogLevel::Debug));
        assert!(!should_log(&LogTag::Listings, LogLevel::Debug));
        set_logger_config(LoggerConfig::default());
    }
}
