//! File access shared by the config and cheat stores.
//!
//! - Reading tolerates non-UTF-8 bytes (older cheat databases carry Latin-1
//!   game names); invalid sequences become U+FFFD instead of failing the load.
//! - Writing never truncates the destination in place.  The new contents go
//!   to a temporary file in the same directory, which is then renamed over the
//!   target, so a failed save leaves the previous file intact.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ConfigError;

/// Reads `path` as text.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the file does not exist and
/// [`ConfigError::Io`] for any other read failure.
pub fn read_text(path: &Path) -> Result<String, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::from_io(path, source))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Replaces the contents of `path` with `contents`.
///
/// Missing parent directories are created first.  An existing file keeps
/// its permissions.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the directory, the temporary file, or the
/// final rename cannot be created.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    // The temporary file starts out private; give it the target's mode.
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.is_file() {
            tmp.as_file().set_permissions(meta.permissions()).map_err(io_err)?;
        }
    }
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_missing_file_is_not_found() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let result = read_text(&dir.path().join("absent.cfg"));

        // Assert
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_read_text_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"gn Pok\xe9mon\n").unwrap();

        let text = read_text(&path).unwrap();

        assert_eq!(text, "gn Pok\u{FFFD}mon\n");
    }

    #[test]
    fn test_write_atomically_creates_parent_directories() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.cfg");

        // Act
        write_atomically(&path, "a=1\n").unwrap();

        // Assert
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a=1\n");
    }

    #[test]
    fn test_write_atomically_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cfg");
        std::fs::write(&path, "old contents that are longer\n").unwrap();

        write_atomically(&path, "new\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomically_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mupen64plus.cfg");
        std::fs::write(&path, "a=1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        // Act
        write_atomically(&path, "a=2\n").unwrap();

        // Assert
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a=2\n");
    }

    #[test]
    fn test_write_atomically_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cfg");

        write_atomically(&path, "x=y\n").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomically_into_directory_path_fails_and_keeps_it() {
        // Arrange: the target is an existing directory, so the rename must fail
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "keep").unwrap();

        // Act
        let result = write_atomically(&target, "data");

        // Assert
        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "keep");
    }
}
