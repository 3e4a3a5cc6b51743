// nativecli - app/make_menu.rs
//
// Non-interactive half of `make:menu`: patch the native service provider
// with generated menu code and optionally scaffold a listener class.
//
// Sequence in `apply_menu`:
//   generate code → open provider → backup → duplicate check →
//   import Menu facade → append to boot() → save → listener.
//
// Questions that need the user (duplicate label, listener overwrite) are
// returned as outcomes; the caller asks and re-invokes with the matching
// flag set.

use crate::app::code_modifier::{CodeModifier, InsertPosition};
use crate::app::locations;
use crate::core::menu::{self, MenuItem, MenuType};
use crate::util::constants::{LISTENERS_DIR, MENU_FACADE, MENU_TARGET_METHOD, NATIVE_PROVIDER_PATH};
use crate::util::error::{NativeCliError, ProjectError};
use std::path::{Path, PathBuf};

/// Everything `apply_menu` needs to know.
#[derive(Debug, Clone)]
pub struct MenuRequest {
    /// Menu label, also used for the listener class name.
    pub name: String,
    pub menu_type: MenuType,
    /// Items for `MenuType::Custom`; other types use their template when empty.
    pub items: Vec<MenuItem>,
    /// Indent for a menu-bar app.
    pub menu_bar: bool,
    /// Scaffold a listener class (never for custom menus).
    pub with_listener: bool,
    /// Insert even if a menu with the same label is already in `boot()`.
    pub allow_duplicate: bool,
    /// Replace an existing listener file.
    pub overwrite_listener: bool,
}

impl MenuRequest {
    pub fn new(name: &str, menu_type: MenuType) -> Self {
        Self {
            name: name.to_string(),
            menu_type,
            items: Vec::new(),
            menu_bar: false,
            with_listener: true,
            allow_duplicate: false,
            overwrite_listener: false,
        }
    }
}

/// What happened to the listener file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// Not requested, or the menu is custom.
    Skipped,
    Created { path: PathBuf, class_name: String },
    /// A file is already there and `overwrite_listener` was not set.
    AlreadyExists { path: PathBuf, class_name: String },
}

/// Result of a successful provider update.
#[derive(Debug, Clone)]
pub struct MenuApplied {
    pub provider: PathBuf,
    pub backup: PathBuf,
    /// The fragment inserted into `boot()`.
    pub code: String,
    pub listener: ListenerOutcome,
}

#[derive(Debug, Clone)]
pub enum MenuOutcome {
    /// A menu with this label exists and duplicates were not allowed.
    /// The backup has been written; the provider is unchanged.
    Duplicate { provider: PathBuf },
    Applied(MenuApplied),
}

/// Project must be Laravel with a NativePHP package required.
pub fn check_preconditions(project_dir: &Path) -> Result<(), NativeCliError> {
    locations::require_laravel_project(project_dir)?;
    if !locations::is_nativephp_installed(project_dir)? {
        return Err(ProjectError::NativePhpMissing.into());
    }
    Ok(())
}

/// Path of the native service provider inside `project_dir`.
pub fn provider_path(project_dir: &Path) -> PathBuf {
    project_dir.join(NATIVE_PROVIDER_PATH)
}

/// Insert the requested menu into the provider's `boot()` method.
pub fn apply_menu(project_dir: &Path, request: &MenuRequest) -> Result<MenuOutcome, NativeCliError> {
    let code = menu::generate_menu_code(
        &request.name,
        request.menu_type,
        &request.items,
        request.menu_bar,
    );

    let provider = provider_path(project_dir);
    if !provider.is_file() {
        return Err(ProjectError::ProviderNotFound { path: provider }.into());
    }

    let mut modifier = CodeModifier::open(&provider)?;
    modifier.backup()?;

    let label_call = menu::label_call(&request.name);
    if !request.allow_duplicate && modifier.method_contains(MENU_TARGET_METHOD, &label_call) {
        tracing::info!(menu = %request.name, "Menu label already present in boot()");
        return Ok(MenuOutcome::Duplicate { provider });
    }

    modifier.add_use_statement(MENU_FACADE)?;
    modifier.insert_into_method(MENU_TARGET_METHOD, &code, InsertPosition::End)?;
    modifier.save()?;
    tracing::info!(menu = %request.name, kind = %request.menu_type, "Menu code inserted");

    let listener = if request.with_listener && request.menu_type != MenuType::Custom {
        write_listener(project_dir, &request.name, request.overwrite_listener)?
    } else {
        ListenerOutcome::Skipped
    };

    Ok(MenuOutcome::Applied(MenuApplied {
        backup: modifier.backup_path(),
        provider,
        code,
        listener,
    }))
}

/// Write `app/Listeners/<Name>MenuListener.php` for `menu_name`.
pub fn write_listener(
    project_dir: &Path,
    menu_name: &str,
    overwrite: bool,
) -> Result<ListenerOutcome, NativeCliError> {
    let class_name = menu::listener_class_name(menu_name);
    let dir = project_dir.join(LISTENERS_DIR);
    let path = dir.join(format!("{class_name}.php"));

    if path.exists() && !overwrite {
        return Ok(ListenerOutcome::AlreadyExists { path, class_name });
    }

    std::fs::create_dir_all(&dir).map_err(|e| NativeCliError::Io {
        path: dir.clone(),
        operation: "create listeners directory",
        source: e,
    })?;

    let source = menu::event_listener_code(menu_name, &class_name);
    std::fs::write(&path, source).map_err(|e| NativeCliError::Io {
        path: path.clone(),
        operation: "write listener",
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Listener created");
    Ok(ListenerOutcome::Created { path, class_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROVIDER: &str = "<?php

namespace App\\Providers;

use Native\\Laravel\\Contracts\\ProvidesPhpIni;
use Native\\Laravel\\Facades\\Window;

class NativeAppServiceProvider implements ProvidesPhpIni
{
    public function boot(): void
    {
        Window::open();
    }

    public function phpIni(): array
    {
        return [];
    }
}
";

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let provider = provider_path(dir.path());
        std::fs::create_dir_all(provider.parent().unwrap()).unwrap();
        std::fs::write(&provider, PROVIDER).unwrap();
        dir
    }

    #[test]
    fn test_preconditions() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            check_preconditions(dir.path()),
            Err(NativeCliError::Project(ProjectError::NotLaravelProject { .. }))
        ));

        std::fs::write(dir.path().join("artisan"), "").unwrap();
        std::fs::write(dir.path().join("composer.json"), r#"{"require": {}}"#).unwrap();
        assert!(matches!(
            check_preconditions(dir.path()),
            Err(NativeCliError::Project(ProjectError::NativePhpMissing))
        ));

        std::fs::write(
            dir.path().join("composer.json"),
            r#"{"require": {"nativephp/desktop": "^1.0"}}"#,
        )
        .unwrap();
        assert!(check_preconditions(dir.path()).is_ok());
    }

    #[test]
    fn test_missing_provider() {
        let dir = TempDir::new().unwrap();
        let err = apply_menu(dir.path(), &MenuRequest::new("File", MenuType::File)).unwrap_err();
        assert!(matches!(
            err,
            NativeCliError::Project(ProjectError::ProviderNotFound { .. })
        ));
    }

    #[test]
    fn test_custom_menu_never_writes_listener() {
        let dir = project();
        let mut request = MenuRequest::new("Tools", MenuType::Custom);
        request.items = vec![MenuItem::item("Run", "tools.run")];

        let MenuOutcome::Applied(applied) = apply_menu(dir.path(), &request).unwrap() else {
            panic!("expected Applied");
        };
        assert_eq!(applied.listener, ListenerOutcome::Skipped);
        assert!(!dir.path().join(LISTENERS_DIR).exists());
    }

    #[test]
    fn test_existing_listener_is_kept_unless_overwrite() {
        let dir = project();
        std::fs::create_dir_all(dir.path().join(LISTENERS_DIR)).unwrap();
        let existing = dir.path().join(LISTENERS_DIR).join("FileMenuListener.php");
        std::fs::write(&existing, "custom").unwrap();

        let outcome = write_listener(dir.path(), "File", false).unwrap();
        assert!(matches!(outcome, ListenerOutcome::AlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "custom");

        let outcome = write_listener(dir.path(), "File", true).unwrap();
        assert!(matches!(outcome, ListenerOutcome::Created { .. }));
        assert!(std::fs::read_to_string(&existing)
            .unwrap()
            .contains("class FileMenuListener"));
    }
}
