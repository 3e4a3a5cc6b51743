// nativecli - app/locations.rs
//
// Project inspection: is this a Laravel/NativePHP project, what is the
// NativePHP app id, and where do its log files live.
//
// Log locations:
//   - `laravel`: <project>/storage/logs/laravel.log (development).
//   - `native-production` (desktop only): the packaged app's storage
//     directory under the per-user application data root:
//       macOS    ~/Library/Application Support/<id>/storage/logs/laravel.log
//       Linux    $XDG_CONFIG_HOME (or ~/.config)/<id>/storage/logs/laravel.log
//       Windows  %APPDATA%\<id>\storage\logs\laravel.log
//
// Host details (OS, home, XDG/APPDATA) are passed in as `HostEnv` so
// detection can be exercised for every OS from any OS.

use crate::core::model::{LogSource, Platform};
use crate::platform::fs::read_optional;
use crate::util::constants::{NATIVEPHP_PACKAGES, UNKNOWN_APP_ID};
use crate::util::error::{NativeCliError, ProjectError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Name of the development log source.
pub const LARAVEL_SOURCE: &str = "laravel";

/// Name of the packaged desktop app's log source.
pub const NATIVE_PRODUCTION_SOURCE: &str = "native-production";

// =============================================================================
// Host environment
// =============================================================================

/// Operating system family, as far as log locations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl OsFamily {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// The parts of the host environment that determine production log paths.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub os: OsFamily,
    pub home: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub app_data: Option<PathBuf>,
}

impl HostEnv {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let non_empty = |var: &str| {
            std::env::var_os(var)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            os: OsFamily::current(),
            home,
            xdg_config_home: non_empty("XDG_CONFIG_HOME"),
            app_data: non_empty("APPDATA"),
        }
    }

    /// Per-user directory holding packaged desktop app data, if known.
    fn app_data_root(&self) -> Option<PathBuf> {
        match self.os {
            OsFamily::MacOs => self
                .home
                .as_ref()
                .map(|h| h.join("Library").join("Application Support")),
            OsFamily::Linux => self
                .xdg_config_home
                .clone()
                .or_else(|| self.home.as_ref().map(|h| h.join(".config"))),
            OsFamily::Windows => self.app_data.clone(),
            OsFamily::Other => None,
        }
    }
}

// =============================================================================
// Log locations
// =============================================================================

fn storage_log(root: &Path) -> PathBuf {
    root.join("storage").join("logs").join("laravel.log")
}

/// Every path that log detection considers, existing or not, in source order.
pub fn candidate_log_locations(
    project_dir: &Path,
    app_id: &str,
    platform: Platform,
    env: &HostEnv,
) -> Vec<LogSource> {
    let mut candidates = vec![LogSource {
        name: LARAVEL_SOURCE.to_string(),
        path: storage_log(project_dir),
    }];

    if platform == Platform::Desktop {
        if let Some(root) = env.app_data_root() {
            candidates.push(LogSource {
                name: NATIVE_PRODUCTION_SOURCE.to_string(),
                path: storage_log(&root.join(app_id)),
            });
        }
    }

    candidates
}

/// Log files that exist for this project, in source order.
pub fn detect_log_locations(
    project_dir: &Path,
    app_id: &str,
    platform: Platform,
    env: &HostEnv,
) -> Vec<LogSource> {
    candidate_log_locations(project_dir, app_id, platform, env)
        .into_iter()
        .filter(|source| {
            let exists = source.path.is_file();
            tracing::debug!(
                source = %source.name,
                path = %source.path.display(),
                exists,
                "Checked log location"
            );
            exists
        })
        .collect()
}

// =============================================================================
// App id
// =============================================================================

fn env_var_pattern(name: &'static str) -> Regex {
    Regex::new(&format!(r"(?m)^\s*{name}=(\S+)")).expect("env var regex")
}

fn native_app_id_env() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| env_var_pattern("NATIVEPHP_APP_ID"))
}

fn app_name_env() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| env_var_pattern("APP_NAME"))
}

fn config_app_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"'app_id'\s*=>\s*(?:env\(\s*'NATIVEPHP_APP_ID'\s*(?:,\s*['"](?P<default>[^'"]+)['"])?\s*\)|['"](?P<literal>[^'"]+)['"])"#,
        )
        .expect("config app_id regex")
    })
}

fn env_value(content: &str, re: &Regex) -> Option<String> {
    let raw = re.captures(content)?.get(1)?.as_str();
    let value = raw.trim_matches(|c| c == '"' || c == '\'');
    (!value.is_empty()).then(|| value.to_string())
}

/// Identifier of the packaged NativePHP app, used to find production logs.
///
/// Lookup order: `NATIVEPHP_APP_ID` in `.env`, the `app_id` entry of
/// `config/nativephp.php` (env default or literal), `APP_NAME` in `.env`,
/// then `"unknown"`.
pub fn detect_app_id(project_dir: &Path) -> String {
    let env = read_optional(&project_dir.join(".env"));

    let from_env = env
        .as_deref()
        .and_then(|content| env_value(content, native_app_id_env()));

    let from_config = || {
        let content = read_optional(&project_dir.join("config").join("nativephp.php"))?;
        let caps = config_app_id().captures(&content)?;
        caps.name("default")
            .or_else(|| caps.name("literal"))
            .map(|m| m.as_str().to_string())
    };

    let from_app_name = || {
        env.as_deref()
            .and_then(|content| env_value(content, app_name_env()))
    };

    let app_id = from_env
        .or_else(from_config)
        .or_else(from_app_name)
        .unwrap_or_else(|| UNKNOWN_APP_ID.to_string());

    tracing::debug!(app_id = %app_id, "Detected app id");
    app_id
}

// =============================================================================
// Project checks
// =============================================================================

/// A Laravel project has both `artisan` and `composer.json` at its root.
pub fn is_laravel_project(project_dir: &Path) -> bool {
    project_dir.join("artisan").exists() && project_dir.join("composer.json").exists()
}

/// Fail with `NotLaravelProject` unless `project_dir` is a Laravel project.
pub fn require_laravel_project(project_dir: &Path) -> Result<(), ProjectError> {
    if is_laravel_project(project_dir) {
        Ok(())
    } else {
        Err(ProjectError::NotLaravelProject {
            path: project_dir.to_path_buf(),
        })
    }
}

/// Whether composer.json requires a NativePHP package in `require` or
/// `require-dev`. A missing composer.json means not installed.
pub fn is_nativephp_installed(project_dir: &Path) -> Result<bool, NativeCliError> {
    let path = project_dir.join("composer.json");
    if !path.exists() {
        return Ok(false);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| NativeCliError::Io {
        path: path.clone(),
        operation: "read composer.json",
        source: e,
    })?;
    let manifest: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ProjectError::ComposerJson { path, source: e })?;

    let installed = ["require", "require-dev"].iter().any(|section| {
        manifest
            .get(section)
            .and_then(|deps| deps.as_object())
            .is_some_and(|deps| NATIVEPHP_PACKAGES.iter().any(|pkg| deps.contains_key(*pkg)))
    });

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn host(os: OsFamily) -> HostEnv {
        HostEnv {
            os,
            home: Some(PathBuf::from("/home/dev")),
            xdg_config_home: None,
            app_data: Some(PathBuf::from("C:/Users/dev/AppData/Roaming")),
        }
    }

    fn production_path(env: &HostEnv) -> Option<PathBuf> {
        candidate_log_locations(Path::new("/p"), "com.example.app", Platform::Desktop, env)
            .into_iter()
            .find(|s| s.name == NATIVE_PRODUCTION_SOURCE)
            .map(|s| s.path)
    }

    #[test]
    fn test_production_path_per_os() {
        assert_eq!(
            production_path(&host(OsFamily::MacOs)).unwrap(),
            Path::new("/home/dev/Library/Application Support/com.example.app/storage/logs/laravel.log")
        );
        assert_eq!(
            production_path(&host(OsFamily::Linux)).unwrap(),
            Path::new("/home/dev/.config/com.example.app/storage/logs/laravel.log")
        );
        assert_eq!(
            production_path(&host(OsFamily::Windows)).unwrap(),
            Path::new("C:/Users/dev/AppData/Roaming/com.example.app/storage/logs/laravel.log")
        );
        assert!(production_path(&host(OsFamily::Other)).is_none());
    }

    #[test]
    fn test_linux_prefers_xdg_config_home() {
        let env = HostEnv {
            xdg_config_home: Some(PathBuf::from("/xdg")),
            ..host(OsFamily::Linux)
        };
        assert_eq!(
            production_path(&env).unwrap(),
            Path::new("/xdg/com.example.app/storage/logs/laravel.log")
        );
    }

    #[test]
    fn test_mobile_has_no_production_candidate() {
        let candidates =
            candidate_log_locations(Path::new("/p"), "x", Platform::Mobile, &host(OsFamily::Linux));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, LARAVEL_SOURCE);
    }

    #[test]
    fn test_detect_only_existing_files() {
        let project = TempDir::new().unwrap();
        let xdg = TempDir::new().unwrap();
        let env = HostEnv {
            xdg_config_home: Some(xdg.path().to_path_buf()),
            ..host(OsFamily::Linux)
        };

        assert!(detect_log_locations(project.path(), "app", Platform::Desktop, &env).is_empty());

        let prod = storage_log(&xdg.path().join("app"));
        std::fs::create_dir_all(prod.parent().unwrap()).unwrap();
        std::fs::write(&prod, "").unwrap();
        let dev = storage_log(project.path());
        std::fs::create_dir_all(dev.parent().unwrap()).unwrap();
        std::fs::write(&dev, "").unwrap();

        let found = detect_log_locations(project.path(), "app", Platform::Desktop, &env);
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, [LARAVEL_SOURCE, NATIVE_PRODUCTION_SOURCE]);
    }

    #[test]
    fn test_app_id_from_env_trims_quotes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "APP_NAME=Laravel\nNATIVEPHP_APP_ID=\"com.acme.notes\"\n",
        )
        .unwrap();
        assert_eq!(detect_app_id(dir.path()), "com.acme.notes");
    }

    #[test]
    fn test_app_id_from_config_default_and_literal() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        let config = dir.path().join("config").join("nativephp.php");

        std::fs::write(
            &config,
            "<?php\nreturn [\n    'version' => '1.0',\n    'app_id' => env('NATIVEPHP_APP_ID', 'com.acme.cfg'),\n];\n",
        )
        .unwrap();
        assert_eq!(detect_app_id(dir.path()), "com.acme.cfg");

        std::fs::write(&config, "<?php\nreturn ['app_id' => \"com.acme.lit\"];\n").unwrap();
        assert_eq!(detect_app_id(dir.path()), "com.acme.lit");
    }

    #[test]
    fn test_app_id_falls_back_to_app_name_then_unknown() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_app_id(dir.path()), UNKNOWN_APP_ID);

        std::fs::write(dir.path().join(".env"), "VITE_APP_NAME=x\nAPP_NAME='Notes'\n").unwrap();
        assert_eq!(detect_app_id(dir.path()), "Notes");
    }

    #[test]
    fn test_laravel_project_requires_both_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("artisan"), "").unwrap();
        assert!(!is_laravel_project(dir.path()));
        assert!(require_laravel_project(dir.path()).is_err());

        std::fs::write(dir.path().join("composer.json"), "{}").unwrap();
        assert!(is_laravel_project(dir.path()));
    }

    #[test]
    fn test_nativephp_in_require_or_require_dev() {
        let dir = TempDir::new().unwrap();
        let composer = dir.path().join("composer.json");

        std::fs::write(&composer, r#"{"require": {"laravel/framework": "^11.0"}}"#).unwrap();
        assert!(!is_nativephp_installed(dir.path()).unwrap());

        std::fs::write(&composer, r#"{"require-dev": {"nativephp/mobile": "*"}}"#).unwrap();
        assert!(is_nativephp_installed(dir.path()).unwrap());

        std::fs::write(&composer, "{broken").unwrap();
        assert!(matches!(
            is_nativephp_installed(dir.path()),
            Err(NativeCliError::Project(ProjectError::ComposerJson { .. }))
        ));
    }
}
