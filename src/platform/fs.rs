// nativecli - platform/fs.rs
//
// Filesystem helpers shared by log reading and project inspection.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a text file, treating a missing file as `None`.
///
/// Other I/O errors are logged at debug and also yield `None`; callers use
/// this for optional project files (`.env`, config stubs) where absence and
/// unreadability lead to the same fallback.
pub fn read_optional(path: &Path) -> Option<String> {
    match read_file_lossy(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Optional file unreadable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lossy_read_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.log");
        std::fs::write(&path, b"ok \xff end").unwrap();
        assert_eq!(read_file_lossy(&path).unwrap(), "ok \u{FFFD} end");
    }

    #[test]
    fn test_read_optional_missing() {
        let dir = TempDir::new().unwrap();
        assert!(read_optional(&dir.path().join("nope")).is_none());
    }
}
