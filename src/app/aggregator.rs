// nativecli - app/aggregator.rs
//
// Multi-source log aggregation: registration, filtering, bulk reads.
// Follow mode lives in `app::follow`.
//
// Bulk reads are best effort. A source that cannot be read (permissions,
// locked file, path replaced by a directory) contributes zero entries;
// the failure is typed as `ReadError` and discarded here, never surfaced
// to the caller of `get_logs` / `tail`.

use crate::core::filter::FilterState;
use crate::core::model::{LogEntry, LogSource};
use crate::core::parser;
use crate::platform::fs::read_file_lossy;
use crate::util::constants::FOLLOW_POLL_INTERVAL_MS;
use crate::util::error::ReadError;
use chrono::{DateTime, FixedOffset};
use std::path::Path;
use std::time::Duration;

/// Collects log entries from named files and presents a filtered,
/// newest-first view of them.
#[derive(Debug, Clone)]
pub struct LogAggregator {
    /// Registered sources in registration order.
    sources: Vec<LogSource>,
    filters: FilterState,
    /// Idle sleep between follow polls.
    pub(crate) poll_interval: Duration,
}

impl LogAggregator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            filters: FilterState::default(),
            poll_interval: Duration::from_millis(FOLLOW_POLL_INTERVAL_MS),
        }
    }

    /// Override the idle sleep used by follow mode.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Register `path` under `name` if the path exists.
    ///
    /// Missing paths are ignored without error so callers can probe several
    /// candidate locations. Registering an existing name again replaces its
    /// path but keeps its position.
    pub fn add_log_source(&mut self, name: &str, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(source = name, path = %path.display(), "Log source not found; skipped");
            return self;
        }

        match self.sources.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.path = path.to_path_buf(),
            None => self.sources.push(LogSource {
                name: name.to_string(),
                path: path.to_path_buf(),
            }),
        }
        tracing::debug!(source = name, path = %path.display(), "Log source registered");
        self
    }

    /// Keep only entries of `level` (case-insensitive).
    pub fn filter_by_level(&mut self, level: &str) -> &mut Self {
        self.filters.level = Some(level.to_lowercase());
        self
    }

    /// Keep only entries from the source registered as `source`.
    /// `"all"` disables source filtering.
    pub fn filter_by_source(&mut self, source: &str) -> &mut Self {
        self.filters.source = Some(source.to_string());
        self
    }

    /// Restrict entries to an inclusive time range. A `None` bound leaves
    /// any previously set bound in place.
    pub fn filter_by_date(
        &mut self,
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> &mut Self {
        if start.is_some() {
            self.filters.start = start;
        }
        if end.is_some() {
            self.filters.end = end;
        }
        self
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Registered sources in registration order.
    pub fn log_sources(&self) -> &[LogSource] {
        &self.sources
    }

    /// Read, merge, sort (newest first), filter, then page.
    ///
    /// Returns at most `limit` entries starting at `offset` of the filtered,
    /// sorted sequence. The sort is stable: entries with equal timestamps
    /// keep registration order, then file order.
    pub fn get_logs(&self, limit: usize, offset: usize) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = Vec::new();

        for source in self.selected_sources() {
            match read_source(source) {
                Ok(parsed) => entries.extend(parsed),
                Err(e) => {
                    tracing::debug!(source = %source.name, error = %e, "Skipping unreadable log source");
                }
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        entries
            .into_iter()
            .filter(|entry| self.filters.matches(entry))
            .skip(offset)
            .take(limit)
            .collect()
    }

    /// The `n` most recent entries passing all filters, newest first.
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let mut logs = self.get_logs(usize::MAX, 0);
        logs.truncate(n);
        logs
    }

    /// Number of entries passing all filters.
    pub fn log_count(&self) -> usize {
        self.get_logs(usize::MAX, 0).len()
    }

    /// Sources that pass the source filter, in registration order.
    pub(crate) fn selected_sources(&self) -> impl Iterator<Item = &LogSource> {
        self.sources
            .iter()
            .filter(|source| self.filters.accepts_source(&source.name))
    }
}

impl Default for LogAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse one source in full.
fn read_source(source: &LogSource) -> Result<Vec<LogEntry>, ReadError> {
    let content = read_file_lossy(&source.path).map_err(|e| ReadError::Io {
        path: source.path.clone(),
        source: e,
    })?;
    Ok(parser::parse_content(&content, &source.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_timestamp;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_add_source_chains_and_ignores_missing() {
        let dir = TempDir::new().unwrap();
        let a = write_log(&dir, "a.log", "");
        let b = write_log(&dir, "b.log", "");

        let mut aggregator = LogAggregator::new();
        aggregator
            .add_log_source("a", &a)
            .add_log_source("missing", "/non/existent/file.log")
            .add_log_source("b", &b);

        let names: Vec<_> = aggregator.log_sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_reregistering_name_replaces_path_in_place() {
        let dir = TempDir::new().unwrap();
        let a = write_log(&dir, "a.log", "");
        let b = write_log(&dir, "b.log", "");
        let c = write_log(&dir, "c.log", "");

        let mut aggregator = LogAggregator::new();
        aggregator
            .add_log_source("x", &a)
            .add_log_source("y", &b)
            .add_log_source("x", &c);

        assert_eq!(aggregator.log_sources().len(), 2);
        assert_eq!(aggregator.log_sources()[0].path, c);
    }

    #[test]
    fn test_filters_are_additive() {
        let mut aggregator = LogAggregator::new();
        aggregator
            .filter_by_level("ERROR")
            .filter_by_date(parse_timestamp("2025-01-01"), None)
            .filter_by_date(None, parse_timestamp("2025-02-01"));

        let filters = aggregator.filters();
        assert_eq!(filters.level.as_deref(), Some("error"));
        assert!(filters.start.is_some());
        assert!(filters.end.is_some());
    }

    #[test]
    fn test_equal_timestamps_keep_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            "same.log",
            "[2025-01-15 10:00:00] local.INFO: first\n\
             [2025-01-15 10:00:00] local.INFO: second\n\
             [2025-01-15 10:00:00] local.INFO: third\n",
        );

        let mut aggregator = LogAggregator::new();
        aggregator.add_log_source("t", &path);
        let messages: Vec<_> = aggregator
            .get_logs(10, 0)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn test_offset_pages_after_filtering() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            "page.log",
            "[2025-01-15 10:00:00] local.ERROR: e0\n\
             [2025-01-15 10:01:00] local.INFO: i1\n\
             [2025-01-15 10:02:00] local.ERROR: e2\n\
             [2025-01-15 10:03:00] local.ERROR: e3\n",
        );

        let mut aggregator = LogAggregator::new();
        aggregator.add_log_source("t", &path).filter_by_level("error");

        let page: Vec<_> = aggregator.get_logs(2, 1).into_iter().map(|e| e.message).collect();
        assert_eq!(page, ["e2", "e0"]);
        assert!(aggregator.get_logs(10, 5).is_empty());
    }
}
