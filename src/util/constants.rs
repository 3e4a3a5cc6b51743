// nativecli - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "nativecli";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "nativecli";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log aggregation
// =============================================================================

/// Default number of entries shown by `logs` when `--lines` is omitted.
pub const DEFAULT_LOG_LINES: usize = 50;

/// Smallest accepted `[logs] default_lines` value.
pub const MIN_LOG_LINES: usize = 1;

/// Largest accepted `[logs] default_lines` value.
pub const MAX_LOG_LINES: usize = 100_000;

/// Source-filter value that disables source filtering.
pub const ALL_SOURCES: &str = "all";

/// Level assigned to lines that do not match the recognised log format.
pub const FALLBACK_LEVEL: &str = "info";

// =============================================================================
// Follow mode
// =============================================================================

/// Idle sleep between follow polls when no source has new content.
pub const FOLLOW_POLL_INTERVAL_MS: u64 = 100;

/// Lower bound for a configured follow poll interval.
pub const MIN_FOLLOW_POLL_INTERVAL_MS: u64 = 10;

/// Upper bound for a configured follow poll interval.
pub const MAX_FOLLOW_POLL_INTERVAL_MS: u64 = 10_000; // 10 s

/// Maximum bytes consumed from a single source in one poll iteration.
///
/// A burst of writes larger than this is drained over several iterations
/// so one busy file cannot starve the others.
pub const MAX_FOLLOW_READ_BYTES_PER_TICK: usize = 512 * 1_024; // 512 KiB

// =============================================================================
// Code modification
// =============================================================================

/// Suffix appended to a file path to form its backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Provider file patched by `make:menu`, relative to the project root.
pub const NATIVE_PROVIDER_PATH: &str = "app/Providers/NativeAppServiceProvider.php";

/// Directory receiving generated menu listeners, relative to the project root.
pub const LISTENERS_DIR: &str = "app/Listeners";

/// Facade imported into the provider before menu code is inserted.
pub const MENU_FACADE: &str = "Native\\Laravel\\Facades\\Menu";

/// Provider method receiving generated menu code.
pub const MENU_TARGET_METHOD: &str = "boot";

/// Composer packages that indicate NativePHP is installed.
pub const NATIVEPHP_PACKAGES: &[&str] = &["nativephp/desktop", "nativephp/mobile"];

// =============================================================================
// Configuration
// =============================================================================

/// Default tracing filter when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Tool settings file name (inside the platform config directory).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration file name (project root or global config directory).
pub const USER_CONFIG_FILE_NAME: &str = ".nativecli.json";

/// App identifier used for production log lookup when none can be detected.
pub const UNKNOWN_APP_ID: &str = "unknown";
