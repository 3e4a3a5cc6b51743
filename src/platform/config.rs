// nativecli - platform/config.rs
//
// Platform directory resolution and both configuration layers:
//
//   - config.toml: tool settings (default line count, follow poll interval,
//     diagnostics level). Validated at load time against named bounds;
//     invalid values produce warnings and fall back to defaults.
//   - .nativecli.json: user configuration, one file per project (local) and
//     one in the platform config directory (global). Read and written by the
//     `config` command; malformed JSON is fatal.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for nativecli configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/nativecli/ or %APPDATA%\nativecli\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn resolve() -> Option<Self> {
        let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) else {
            tracing::warn!("Could not determine platform directories");
            return None;
        };

        let config_dir = proj_dirs.config_dir().to_path_buf();
        tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
        Some(Self { config_dir })
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still works
/// with an older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logs]` section.
    pub logs: LogsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[logs]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LogsSection {
    /// Entries shown when `--lines` is omitted.
    pub default_lines: Option<usize>,
    /// Follow-mode idle sleep in milliseconds.
    pub poll_interval_ms: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Diagnostics level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated tool settings derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub default_lines: usize,
    pub poll_interval: Duration,
    /// Diagnostics level (read before tracing is initialised).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_lines: constants::DEFAULT_LOG_LINES,
            poll_interval: Duration::from_millis(constants::FOLLOW_POLL_INTERVAL_MS),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from `config_dir`.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults with one warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path,
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, mut validation) = match parse_config(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::debug!(path = %config_path.display(), "Loaded config.toml");
    warnings.append(&mut validation);
    (config, warnings)
}

/// Parse and validate config.toml content.
///
/// Out-of-range values are reported as warnings and replaced by defaults.
pub fn parse_config(content: &str) -> Result<(AppConfig, Vec<String>), toml::de::Error> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Logs: default_lines --
    if let Some(lines) = raw.logs.default_lines {
        if (constants::MIN_LOG_LINES..=constants::MAX_LOG_LINES).contains(&lines) {
            config.default_lines = lines;
        } else {
            warnings.push(out_of_range(
                "logs.default_lines",
                lines,
                constants::MIN_LOG_LINES,
                constants::MAX_LOG_LINES,
                constants::DEFAULT_LOG_LINES,
            ));
        }
    }

    // -- Logs: poll_interval_ms --
    if let Some(ms) = raw.logs.poll_interval_ms {
        if (constants::MIN_FOLLOW_POLL_INTERVAL_MS..=constants::MAX_FOLLOW_POLL_INTERVAL_MS)
            .contains(&ms)
        {
            config.poll_interval = Duration::from_millis(ms);
        } else {
            warnings.push(out_of_range(
                "logs.poll_interval_ms",
                ms,
                constants::MIN_FOLLOW_POLL_INTERVAL_MS,
                constants::MAX_FOLLOW_POLL_INTERVAL_MS,
                constants::FOLLOW_POLL_INTERVAL_MS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    Ok((config, warnings))
}

fn out_of_range<T: std::fmt::Display>(field: &str, value: T, min: T, max: T, default: T) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: format!("{min}-{max}"),
    };
    format!("{err}. Using default ({default}).")
}

// =============================================================================
// .nativecli.json user configuration
// =============================================================================

/// A user configuration file and its parsed contents.
///
/// Keys are addressed with dots: `updates.check` is `{"updates": {"check": _}}`.
#[derive(Debug, Clone)]
pub struct UserConfig {
    path: PathBuf,
    values: Map<String, Value>,
}

impl UserConfig {
    /// Load `.nativecli.json` from `dir`. A missing file is an empty config.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(constants::USER_CONFIG_FILE_NAME);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No user configuration file");
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let values = serde_json::from_str(&content).map_err(|e| ConfigError::JsonParse {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Loaded user configuration");
        Ok(Self { path, values })
    }

    /// The project-level configuration in `project_dir`.
    pub fn local(project_dir: &Path) -> Result<Self, ConfigError> {
        Self::load(project_dir)
    }

    /// The configuration in the platform config directory.
    pub fn global(paths: Option<&PlatformPaths>) -> Result<Self, ConfigError> {
        let paths = paths.ok_or(ConfigError::GlobalDirNotFound)?;
        Self::load(&paths.config_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All values as a JSON object.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Look up a dotted key. A literal top-level key containing dots wins
    /// over nested traversal.
    pub fn get(&self, key: &str) -> Option<&Value> {
        get_dotted(&self.values, key)
    }

    /// Set a dotted key, creating intermediate objects as needed.
    ///
    /// The strings `"true"` and `"false"` are stored as booleans.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => Value::String(other.to_string()),
        };
        set_dotted(&mut self.values, key, value);
        self
    }

    /// Write the current values as pretty-printed JSON.
    pub fn save(&self) -> Result<(), ConfigError> {
        write_json(&self.path, &Value::Object(self.values.clone()))?;
        tracing::info!(path = %self.path.display(), "User configuration saved");
        Ok(())
    }

    /// Create the file with default values. Fails if it already exists.
    pub fn init(&mut self) -> Result<(), ConfigError> {
        if self.path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: self.path.clone(),
            });
        }

        let defaults = default_user_config();
        write_json(&self.path, &defaults)?;
        if let Value::Object(map) = defaults {
            self.values = map;
        }
        tracing::info!(path = %self.path.display(), "User configuration created");
        Ok(())
    }
}

/// Global and local configuration merged: top-level keys from `local`
/// replace those from `global` wholesale (no deep merge).
#[derive(Debug, Clone, Default)]
pub struct CompiledConfig {
    values: Map<String, Value>,
}

impl CompiledConfig {
    pub fn new(global: &UserConfig, local: &UserConfig) -> Self {
        let mut values = global.values.clone();
        for (key, value) in &local.values {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        get_dotted(&self.values, key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl From<&UserConfig> for CompiledConfig {
    fn from(config: &UserConfig) -> Self {
        Self {
            values: config.values.clone(),
        }
    }
}

fn default_user_config() -> Value {
    json!({
        "updates": {
            "check": true,
            "auto": false,
        },
        "append": {
            "new": "",
            "cache:clear": "",
            "check-update": "",
            "self-update": "",
            "update": "",
        },
    })
}

fn get_dotted<'a>(values: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = values.get(key) {
        return Some(value);
    }

    let mut segments = key.split('.');
    let mut current = values.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn set_dotted(values: &mut Map<String, Value>, key: &str, value: Value) {
    let mut segments: Vec<&str> = key.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = values;
    for segment in segments {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => return,
        };
    }
    current.insert(last.to_string(), value);
}

/// Pretty-print `value` to `path`, creating missing parent directories.
fn write_json(path: &Path, value: &Value) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| ConfigError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_valid_values() {
        let (config, warnings) = parse_config(
            "[logs]\ndefault_lines = 200\npoll_interval_ms = 250\n\n[logging]\nlevel = \"DEBUG\"\n",
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.default_lines, 200);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_config_out_of_range_falls_back() {
        let (config, warnings) =
            parse_config("[logs]\ndefault_lines = 0\npoll_interval_ms = 5\n").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("logs.default_lines"));
    }

    #[test]
    fn test_parse_config_ignores_unknown_keys() {
        let (config, warnings) = parse_config("[future]\nthing = 1\n").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());

        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[logs\n").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_user_config_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = UserConfig::load(dir.path()).unwrap();
        assert!(config.values().is_empty());
        assert!(config.get("updates.check").is_none());
    }

    #[test]
    fn test_user_config_malformed_json_is_fatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(constants::USER_CONFIG_FILE_NAME), "{nope").unwrap();
        let err = UserConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse { .. }));
    }

    #[test]
    fn test_set_coerces_booleans_and_nests() {
        let dir = TempDir::new().unwrap();
        let mut config = UserConfig::load(dir.path()).unwrap();
        config
            .set("updates.check", "false")
            .set("append.new", "--pest")
            .set("flag", "true");

        assert_eq!(config.get("updates.check"), Some(&Value::Bool(false)));
        assert_eq!(config.get("append.new"), Some(&json!("--pest")));
        assert_eq!(config.get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_set_replaces_scalar_with_object() {
        let dir = TempDir::new().unwrap();
        let mut config = UserConfig::load(dir.path()).unwrap();
        config.set("a", "x").set("a.b", "y");
        assert_eq!(config.get("a"), Some(&json!({"b": "y"})));
    }

    #[test]
    fn test_init_then_reload() {
        let dir = TempDir::new().unwrap();
        let mut config = UserConfig::load(dir.path()).unwrap();
        config.init().unwrap();

        let reloaded = UserConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.get("updates.check"), Some(&Value::Bool(true)));
        assert_eq!(reloaded.get("append.cache:clear"), Some(&json!("")));

        let err = config.init().unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
    }

    #[test]
    fn test_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut config = UserConfig::load(dir.path()).unwrap();
        config.set("updates.auto", "true").save().unwrap();

        let text = std::fs::read_to_string(config.path()).unwrap();
        assert!(text.contains("\n"), "saved JSON is pretty-printed");
        let reloaded = UserConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.get("updates.auto"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_global_save_creates_missing_config_dir() {
        let root = TempDir::new().unwrap();
        let paths = PlatformPaths {
            config_dir: root.path().join("nativecli"),
        };

        let mut config = UserConfig::global(Some(&paths)).unwrap();
        config.set("updates.check", "false").save().unwrap();

        let reloaded = UserConfig::global(Some(&paths)).unwrap();
        assert_eq!(reloaded.get("updates.check"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_compiled_is_shallow_local_wins() {
        let global_dir = TempDir::new().unwrap();
        let local_dir = TempDir::new().unwrap();

        let mut global = UserConfig::load(global_dir.path()).unwrap();
        global.set("updates.check", "true").set("updates.auto", "true").set("g", "1");
        let mut local = UserConfig::load(local_dir.path()).unwrap();
        local.set("updates.check", "false");

        let compiled = CompiledConfig::new(&global, &local);
        assert_eq!(compiled.get("updates.check"), Some(&Value::Bool(false)));
        assert!(compiled.get("updates.auto").is_none(), "no deep merge");
        assert_eq!(compiled.get("g"), Some(&json!("1")));
    }

    #[test]
    fn test_compiled_from_single_config() {
        let dir = TempDir::new().unwrap();
        let mut config = UserConfig::load(dir.path()).unwrap();
        config.set("updates.check", "false");

        let compiled = CompiledConfig::from(&config);
        assert_eq!(compiled.values(), config.values());
        assert_eq!(compiled.get("updates.check"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_global_without_platform_dir() {
        let err = UserConfig::global(None).unwrap_err();
        assert!(matches!(err, ConfigError::GlobalDirNotFound));
    }
}
