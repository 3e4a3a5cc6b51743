// nativecli - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its cause so the
// binary can log the full chain at debug level.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all nativecli operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum NativeCliError {
    /// Following log sources failed.
    Follow(FollowError),

    /// A filter argument was invalid.
    Filter(FilterError),

    /// Source file modification failed.
    Modifier(ModifierError),

    /// Configuration loading, validation, or saving failed.
    Config(ConfigError),

    /// The working directory is not a usable project.
    Project(ProjectError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// An interactive prompt failed (terminal closed, not a TTY).
    Prompt(dialoguer::Error),
}

impl fmt::Display for NativeCliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Follow(e) => write!(f, "Error following logs: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Modifier(e) => write!(f, "Failed to modify provider: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Project(e) => write!(f, "{e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Prompt(e) => write!(f, "Prompt failed: {e}"),
        }
    }
}

impl std::error::Error for NativeCliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Follow(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Modifier(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Project(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Prompt(e) => Some(e),
        }
    }
}

impl From<dialoguer::Error> for NativeCliError {
    fn from(e: dialoguer::Error) -> Self {
        Self::Prompt(e)
    }
}

// ---------------------------------------------------------------------------
// Log read errors
// ---------------------------------------------------------------------------

/// Failure reading one registered log source during a bulk read.
///
/// Never escapes the aggregator: a source that fails to read contributes
/// zero entries.
#[derive(Debug)]
pub enum ReadError {
    /// The file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Unable to read log file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Follow errors
// ---------------------------------------------------------------------------

/// Systemic failures of follow mode.
#[derive(Debug)]
pub enum FollowError {
    /// Not a single source (after source filtering) could be opened.
    NoReadableSources { attempted: usize },
}

impl fmt::Display for FollowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoReadableSources { attempted: 0 } => {
                write!(f, "no log sources match the current filters")
            }
            Self::NoReadableSources { attempted } => {
                write!(f, "none of the {attempted} log source(s) could be opened")
            }
        }
    }
}

impl std::error::Error for FollowError {}

impl From<FollowError> for NativeCliError {
    fn from(e: FollowError) -> Self {
        Self::Follow(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter arguments.
#[derive(Debug)]
pub enum FilterError {
    /// A date bound could not be parsed.
    InvalidDate { value: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate { value } => write!(
                f,
                "Invalid date '{value}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS"
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for NativeCliError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Code modifier errors
// ---------------------------------------------------------------------------

/// Errors raised while patching a source file.
#[derive(Debug)]
pub enum ModifierError {
    /// The target file does not exist.
    FileNotFound { path: PathBuf },

    /// No `public function <name>(...) {` declaration was found.
    MethodNotFound { method: String },

    /// The method was declared but its braces never balance.
    UnbalancedBraces { method: String },

    /// A use statement was requested but the file has neither imports nor
    /// a namespace declaration to anchor it.
    NamespaceNotFound { path: PathBuf },

    /// I/O error reading or writing the file or its backup.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ModifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::MethodNotFound { method } => write!(f, "Method {method} not found in file"),
            Self::UnbalancedBraces { method } => {
                write!(f, "Could not find the closing brace of method {method}")
            }
            Self::NamespaceNotFound { path } => write!(
                f,
                "No namespace declaration found in {}",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ModifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ModifierError> for NativeCliError {
    fn from(e: ModifierError) -> Self {
        Self::Modifier(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and saving.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// JSON parsing or serialisation failed.
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The platform configuration directory could not be determined.
    GlobalDirNotFound,

    /// `init` was requested but a configuration file already exists.
    AlreadyExists { path: PathBuf },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading or writing a config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::JsonParse { path, source } => {
                write!(f, "Malformed JSON in '{}': {source}", path.display())
            }
            Self::GlobalDirNotFound => {
                write!(f, "Could not determine the global configuration directory")
            }
            Self::AlreadyExists { path } => write!(
                f,
                "Configuration file already exists: {}",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::JsonParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for NativeCliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Project errors
// ---------------------------------------------------------------------------

/// The working directory does not satisfy a command's preconditions.
#[derive(Debug)]
pub enum ProjectError {
    /// `artisan` or `composer.json` is missing.
    NotLaravelProject { path: PathBuf },

    /// Neither NativePHP package is required in composer.json.
    NativePhpMissing,

    /// The native service provider file does not exist.
    ProviderNotFound { path: PathBuf },

    /// An unknown menu type was requested.
    InvalidMenuType { value: String },

    /// No log file exists at any detected location.
    NoLogSources,

    /// composer.json exists but is not valid JSON.
    ComposerJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLaravelProject { path } => write!(
                f,
                "This command must be run from a Laravel project directory ({})",
                path.display()
            ),
            Self::NativePhpMissing => write!(
                f,
                "NativePHP does not appear to be installed. \
                 Run \"composer require nativephp/desktop\" first."
            ),
            Self::ProviderNotFound { path } => write!(
                f,
                "Could not find NativeAppServiceProvider at '{}'. \
                 Make sure NativePHP is properly installed.",
                path.display()
            ),
            Self::InvalidMenuType { value } => write!(f, "Invalid menu type: {value}"),
            Self::NoLogSources => write!(f, "No log files found."),
            Self::ComposerJson { path, source } => {
                write!(f, "Malformed composer.json '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ProjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ComposerJson { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ProjectError> for NativeCliError {
    fn from(e: ProjectError) -> Self {
        Self::Project(e)
    }
}

/// Convenience type alias for nativecli results.
pub type Result<T> = std::result::Result<T, NativeCliError>;
