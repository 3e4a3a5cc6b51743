// nativecli - core/filter.rs
//
// Composable filter criteria for log entries.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O.

use crate::core::model::LogEntry;
use crate::util::constants::ALL_SOURCES;
use chrono::{DateTime, FixedOffset};

/// Complete filter state. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Lowercase level an entry must have.
    pub level: Option<String>,

    /// Source name an entry must come from. `"all"` disables the check.
    pub source: Option<String>,

    /// Start of time range (inclusive).
    pub start: Option<DateTime<FixedOffset>>,

    /// End of time range (inclusive).
    pub end: Option<DateTime<FixedOffset>>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.source.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Whether entries from the source registered as `name` should be read.
    ///
    /// Only `source` has a wildcard; there is no equivalent for `level`.
    pub fn accepts_source(&self, name: &str) -> bool {
        match self.source.as_deref() {
            None | Some(ALL_SOURCES) => true,
            Some(wanted) => wanted == name,
        }
    }

    /// Level and date checks applied to each parsed entry.
    ///
    /// The source check happens earlier, when deciding which files to read.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(ref level) = self.level {
            if entry.level != *level {
                return false;
            }
        }

        if let Some(ref start) = self.start {
            if entry.timestamp < *start {
                return false;
            }
        }

        if let Some(ref end) = self.end {
            if entry.timestamp > *end {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_timestamp;

    fn make_entry(ts: &str, level: &str, source: &str) -> LogEntry {
        LogEntry {
            timestamp: parse_timestamp(ts).unwrap(),
            level: level.to_string(),
            message: format!("{level} message"),
            source: source.to_string(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterState::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&make_entry("2025-01-15 10:00:00", "debug", "a")));
        assert!(filter.accepts_source("anything"));
    }

    #[test]
    fn test_level_filter() {
        let filter = FilterState {
            level: Some("error".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&make_entry("2025-01-15 10:00:00", "error", "a")));
        assert!(!filter.matches(&make_entry("2025-01-15 10:00:00", "info", "a")));
    }

    #[test]
    fn test_all_is_a_source_wildcard_only() {
        let source_all = FilterState {
            source: Some("all".to_string()),
            ..Default::default()
        };
        assert!(source_all.accepts_source("laravel"));
        assert!(source_all.accepts_source("native-production"));

        let level_all = FilterState {
            level: Some("all".to_string()),
            ..Default::default()
        };
        assert!(!level_all.matches(&make_entry("2025-01-15 10:00:00", "info", "a")));
        assert!(level_all.matches(&make_entry("2025-01-15 10:00:00", "all", "a")));
    }

    #[test]
    fn test_specific_source() {
        let filter = FilterState {
            source: Some("laravel".to_string()),
            ..Default::default()
        };
        assert!(filter.accepts_source("laravel"));
        assert!(!filter.accepts_source("native"));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = FilterState {
            start: parse_timestamp("2025-01-15 10:00:00"),
            end: parse_timestamp("2025-01-15 12:00:00"),
            ..Default::default()
        };
        assert!(filter.matches(&make_entry("2025-01-15 10:00:00", "info", "a")));
        assert!(filter.matches(&make_entry("2025-01-15 12:00:00", "info", "a")));
        assert!(!filter.matches(&make_entry("2025-01-15 09:59:59", "info", "a")));
        assert!(!filter.matches(&make_entry("2025-01-15 12:00:01", "info", "a")));
    }

    #[test]
    fn test_date_bounds_compare_instants_across_offsets() {
        let filter = FilterState {
            start: parse_timestamp("2025-01-15 15:00:00"),
            ..Default::default()
        };
        // 10:00 at -05:00 is 15:00 UTC.
        assert!(filter.matches(&make_entry("2025-01-15 10:00:00.000000-05:00", "info", "a")));
    }

    #[test]
    fn test_combined_filters_are_and() {
        let filter = FilterState {
            level: Some("error".to_string()),
            start: parse_timestamp("2025-01-15"),
            ..Default::default()
        };
        assert!(filter.matches(&make_entry("2025-01-15 10:00:00", "error", "a")));
        assert!(!filter.matches(&make_entry("2025-01-14 10:00:00", "error", "a")));
        assert!(!filter.matches(&make_entry("2025-01-15 10:00:00", "info", "a")));
    }
}
