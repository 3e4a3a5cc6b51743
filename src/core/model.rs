// nativecli - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// presentation concerns.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::path::PathBuf;

// =============================================================================
// Log Entry (normalised output of parsing)
// =============================================================================

/// A single parsed log line.
///
/// Entries are never mutated after parsing. Ordering across sources is
/// imposed by the aggregator at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Timestamp from the line prefix, or the wall-clock time at parse time
    /// when the line did not match the recognised format.
    ///
    /// Serialised as RFC 3339 with an explicit offset (`+00:00`, never `Z`).
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<FixedOffset>,

    /// Lowercase level token (`debug`, `info`, `error`, ...).
    pub level: String,

    /// Message text following the level marker, trimmed.
    pub message: String,

    /// Logical name the originating file was registered under.
    pub source: String,

    /// The line as read from the file, trimmed.
    pub raw: String,
}

fn serialize_rfc3339<S: Serializer>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339())
}

// =============================================================================
// Log Source
// =============================================================================

/// A named log file registered with the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    /// Unique logical name (e.g. "laravel", "native-production").
    pub name: String,

    /// Full path to the log file.
    pub path: PathBuf,
}

// =============================================================================
// Platform
// =============================================================================

/// Target platform of the project whose logs are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            other => Err(format!("unknown platform '{other}' (expected desktop or mobile)")),
        }
    }
}
