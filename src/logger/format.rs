//! Console formatting and output.

use std::io::{self, Write};

use chrono::Utc;
use colored::*;

use super::{LogLevel, LogTag};

fn colorize_tag(tag: LogTag) -> ColoredString {
    let label = format!("[{}]", tag.as_str());
    match tag {
        LogTag::Config => label.cyan(),
        LogTag::Dataset => label.green(),
        LogTag::Badges => label.yellow(),
        LogTag::Facets => label.magenta(),
        LogTag::Filter => label.blue(),
        LogTag::Search => label.bright_blue(),
        LogTag::Listings => label.bright_green(),
        LogTag::Gallery => label.bright_magenta(),
        LogTag::System => label.white(),
    }
}

pub(super) fn write_line(tag: LogTag, level: LogLevel, message: &str) {
    let timestamp = Utc::now().format("%H:%M:%S%.3f");

    let body = match level {
        LogLevel::Error => message.red().to_string(),
        LogLevel::Warning => message.yellow().to_string(),
        LogLevel::Debug | LogLevel::Verbose => message.dimmed().to_string(),
        LogLevel::Info => message.to_string(),
    };

    println!(
        "{} {} {} {}",
        format!("[{}]", timestamp).dimmed(),
        level.as_str().bold(),
        colorize_tag(tag),
        body
    );
    let _ = io::stdout().flush();
}
