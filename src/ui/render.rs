// nativecli - ui/render.rs
//
// Text renderings of log entries for stdout.
//
//   human: [2025-01-15 10:30:00] ERROR     [laravel] Something failed
//   json:  one object per line (timestamp in RFC 3339)

use crate::core::filter::FilterState;
use crate::core::model::{LogEntry, LogSource};
use crate::ui::theme::{level_colour, LEVEL_WIDTH, SOURCE_COLOUR};
use colored::Colorize;

/// Plain (uncoloured) human rendering.
pub fn format_entry_plain(entry: &LogEntry) -> String {
    format!(
        "[{}] {:<width$} [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level.to_uppercase(),
        entry.source,
        entry.message,
        width = LEVEL_WIDTH
    )
}

/// Coloured human rendering: timestamp and level in the level colour,
/// source in cyan.
///
/// `colored` disables itself when stdout is not a terminal or `NO_COLOR` is
/// set, in which case this equals [`format_entry_plain`].
pub fn format_entry(entry: &LogEntry) -> String {
    let head = format!(
        "[{}] {:<width$}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level.to_uppercase(),
        width = LEVEL_WIDTH
    );
    let source = format!("[{}]", entry.source);
    format!(
        "{} {} {}",
        head.color(level_colour(&entry.level)),
        source.color(SOURCE_COLOUR),
        entry.message
    )
}

/// Single-line JSON rendering.
pub fn format_entry_json(entry: &LogEntry) -> serde_json::Result<String> {
    serde_json::to_string(entry)
}

/// `  - name: path` lines for `--verbose`.
pub fn format_sources(sources: &[LogSource]) -> Vec<String> {
    sources
        .iter()
        .map(|s| format!("  - {}: {}", s.name, s.path.display()))
        .collect()
}

/// One-line summary of the active filters for `--verbose`.
pub fn format_filters(filters: &FilterState) -> String {
    if filters.is_empty() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if let Some(ref level) = filters.level {
        parts.push(format!("level={level}"));
    }
    if let Some(ref source) = filters.source {
        parts.push(format!("source={source}"));
    }
    if let Some(ref start) = filters.start {
        parts.push(format!("from={}", start.to_rfc3339()));
    }
    if let Some(ref end) = filters.end {
        parts.push(format!("to={}", end.to_rfc3339()));
    }
    parts.join(", ")
}
