// nativecli - core/parser.rs
//
// Line-oriented parsing of Laravel-style log lines.
// Core layer: operates on strings, never touches the filesystem.
//
// Recognised format:
//   [<timestamp>] <env>.<LEVEL>: <message>
// where <timestamp> is YYYY-MM-DD, optionally followed by (space|T)HH:MM:SS,
// an optional 6-digit fraction and an optional +HH:MM / -HH:MM offset, and
// the `<env>.` prefix is optional.
//
// Lines that do not match become `info` entries stamped with the current
// wall-clock time. Parsing never fails.

use crate::core::model::LogEntry;
use crate::util::constants::FALLBACK_LEVEL;
use crate::util::error::FilterError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\[(?P<timestamp>\d{4}-\d{2}-\d{2}(?:[T\s]\d{2}:\d{2}:\d{2}(?:\.\d{6})?(?:[+-]\d{2}:\d{2})?)?)\]\s*(?:(?P<env>\w+)\.)?(?P<level>\w+):\s+(?P<message>.+)$",
        )
        .expect("line_pattern: invalid regex")
    })
}

/// Parse a single log line.
///
/// Returns `None` only for empty or whitespace-only lines; every other line
/// yields exactly one entry.
pub fn parse_line(line: &str, source: &str) -> Option<LogEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = line_pattern().captures(line) {
        let raw_ts = caps.name("timestamp").map_or("", |m| m.as_str());
        // The pattern guarantees the shape but not the calendar (e.g. month 13).
        let timestamp = parse_timestamp(raw_ts).unwrap_or_else(|| {
            tracing::debug!(source, timestamp = raw_ts, "Impossible timestamp; using now");
            now()
        });

        return Some(LogEntry {
            timestamp,
            level: caps
                .name("level")
                .map_or(FALLBACK_LEVEL.to_string(), |m| m.as_str().to_lowercase()),
            message: caps
                .name("message")
                .map_or_else(String::new, |m| m.as_str().trim().to_string()),
            source: source.to_string(),
            raw: line.to_string(),
        });
    }

    Some(LogEntry {
        timestamp: now(),
        level: FALLBACK_LEVEL.to_string(),
        message: line.to_string(),
        source: source.to_string(),
        raw: line.to_string(),
    })
}

/// Parse every line of `content`, skipping blank lines.
pub fn parse_content(content: &str, source: &str) -> Vec<LogEntry> {
    content
        .lines()
        .filter_map(|line| parse_line(line, source))
        .collect()
}

/// Parse a timestamp captured from a log line prefix.
///
/// Timestamps without an explicit offset are interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    // Date and time may be separated by 'T' or a space; normalise to a space.
    let normalised = if trimmed.len() > 10 && trimmed.as_bytes()[10] == b'T' {
        format!("{} {}", &trimmed[..10], &trimmed[11..])
    } else {
        trimmed.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_str(&normalised, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt);
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ndt.and_utc().fixed_offset());
    }

    NaiveDate::parse_from_str(&normalised, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc().fixed_offset())
}

/// Parse a user-supplied date filter bound (`--start-date`, `--end-date`).
///
/// Accepts everything a log prefix accepts plus RFC 3339.
pub fn parse_date_bound(value: &str) -> Result<DateTime<FixedOffset>, FilterError> {
    parse_timestamp(value)
        .or_else(|| DateTime::parse_from_rfc3339(value.trim()).ok())
        .ok_or_else(|| FilterError::InvalidDate {
            value: value.to_string(),
        })
}

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
