// nativecli - app/code_modifier.rs
//
// In-memory editor for a single source file.
//
// The file is read once on open. Every edit mutates the in-memory buffer
// only; `backup` and `save` are the sole disk writes. No file handle is held
// between calls. Concurrent modifiers on the same path are not supported.

use crate::core::source_patch::{self, BraceDepthLocator, LocateError, MethodBody, MethodLocator};
use crate::util::constants::BACKUP_SUFFIX;
use crate::util::error::ModifierError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Where `insert_into_method` places new code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    /// Immediately after the method's opening brace.
    Start,
    /// Immediately before the method's closing brace.
    #[default]
    End,
}

impl std::str::FromStr for InsertPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            other => Err(format!("unknown insert position '{other}' (expected start or end)")),
        }
    }
}

/// Loads a file, applies structural edits in memory, and writes it back.
#[derive(Debug)]
pub struct CodeModifier<L: MethodLocator = BraceDepthLocator> {
    file_path: PathBuf,
    content: String,
    locator: L,
}

impl CodeModifier<BraceDepthLocator> {
    /// Open `path` with the default brace-depth locator.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ModifierError> {
        Self::with_locator(path, BraceDepthLocator)
    }
}

impl<L: MethodLocator> CodeModifier<L> {
    /// Open `path`, locating methods with `locator`.
    pub fn with_locator(path: impl AsRef<Path>, locator: L) -> Result<Self, ModifierError> {
        let file_path = path.as_ref().to_path_buf();
        if !file_path.exists() {
            return Err(ModifierError::FileNotFound { path: file_path });
        }

        let content = std::fs::read_to_string(&file_path).map_err(|e| ModifierError::Io {
            path: file_path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %file_path.display(), bytes = content.len(), "Loaded source file");

        Ok(Self {
            file_path,
            content,
            locator,
        })
    }

    /// Path of the `.backup` sibling written by [`backup`](Self::backup).
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.file_path.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Write the current buffer to `<path>.backup`, replacing any old backup.
    pub fn backup(&self) -> Result<(), ModifierError> {
        let backup_path = self.backup_path();
        std::fs::write(&backup_path, &self.content).map_err(|e| ModifierError::Io {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!(path = %backup_path.display(), "Backup written");
        Ok(())
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.locator.has_method(&self.content, name)
    }

    pub fn has_use_statement(&self, fqn: &str) -> bool {
        source_patch::has_use_statement(&self.content, fqn)
    }

    /// Import `fqn`, keeping the import block alphabetically ordered.
    ///
    /// A no-op when the symbol (or another symbol with the same short name)
    /// is already imported.
    pub fn add_use_statement(&mut self, fqn: &str) -> Result<(), ModifierError> {
        if self.has_use_statement(fqn) {
            tracing::debug!(import = fqn, "Use statement already present");
            return Ok(());
        }

        let insertion = source_patch::plan_use_insertion(&self.content, fqn).ok_or_else(|| {
            ModifierError::NamespaceNotFound {
                path: self.file_path.clone(),
            }
        })?;

        self.content.insert_str(insertion.offset, &insertion.text);
        tracing::debug!(import = fqn, offset = insertion.offset, "Use statement added");
        Ok(())
    }

    /// Insert `code` (prefixed with a newline) at the start or end of a method
    /// body. Indentation is the caller's responsibility.
    pub fn insert_into_method(
        &mut self,
        method: &str,
        code: &str,
        position: InsertPosition,
    ) -> Result<(), ModifierError> {
        let body = self.locate(method)?;
        let offset = match position {
            InsertPosition::Start => body.start,
            InsertPosition::End => body.end,
        };

        self.content.insert_str(offset, &format!("\n{code}"));
        tracing::debug!(method, ?position, offset, "Code inserted into method");
        Ok(())
    }

    /// Whether the body of `method` contains `needle`. False if the method
    /// cannot be located.
    pub fn method_contains(&self, method: &str, needle: &str) -> bool {
        self.locator
            .locate_method_body(&self.content, method)
            .map(|body| self.content[body.start..body.end].contains(needle))
            .unwrap_or(false)
    }

    /// Write the buffer back to the original path.
    pub fn save(&self) -> Result<(), ModifierError> {
        std::fs::write(&self.file_path, &self.content).map_err(|e| ModifierError::Io {
            path: self.file_path.clone(),
            source: e,
        })?;
        tracing::info!(path = %self.file_path.display(), "Source file saved");
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn locate(&self, method: &str) -> Result<MethodBody, ModifierError> {
        self.locator
            .locate_method_body(&self.content, method)
            .map_err(|e| match e {
                LocateError::NotFound => ModifierError::MethodNotFound {
                    method: method.to_string(),
                },
                LocateError::Unbalanced => ModifierError::UnbalancedBraces {
                    method: method.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_temp(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TestProvider.php");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_open_missing_file() {
        let err = CodeModifier::open("/non/existent/file.php").unwrap_err();
        assert!(matches!(err, ModifierError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: /non/existent/file.php");
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        let (_dir, path) = write_temp("<?php");
        let modifier = CodeModifier::open(&path).unwrap();
        assert_eq!(
            modifier.backup_path().file_name().unwrap(),
            "TestProvider.php.backup"
        );
    }

    #[test]
    fn test_insert_position_from_str() {
        assert_eq!("start".parse::<InsertPosition>().unwrap(), InsertPosition::Start);
        assert_eq!("end".parse::<InsertPosition>().unwrap(), InsertPosition::End);
        assert!("middle".parse::<InsertPosition>().is_err());
        assert_eq!(InsertPosition::default(), InsertPosition::End);
    }

    /// Locator that always reports a fixed body, used to show callers are
    /// independent of brace scanning.
    struct FixedLocator(MethodBody);

    impl MethodLocator for FixedLocator {
        fn locate_method_body(&self, _: &str, name: &str) -> Result<MethodBody, LocateError> {
            if name == "boot" {
                Ok(self.0)
            } else {
                Err(LocateError::NotFound)
            }
        }
    }

    #[test]
    fn test_custom_locator_is_used() {
        let (_dir, path) = write_temp("0123456789");
        let mut modifier =
            CodeModifier::with_locator(&path, FixedLocator(MethodBody { start: 2, end: 5 }))
                .unwrap();

        assert!(modifier.method_contains("boot", "234"));
        assert!(!modifier.method_contains("boot", "5"));
        modifier.insert_into_method("boot", "X", InsertPosition::End).unwrap();
        assert_eq!(modifier.content(), "01234\nX56789");
    }
}
