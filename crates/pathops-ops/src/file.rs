//! Single-file operations.

use std::fs::{self, OpenOptions};
use std::path::Path;

use filetime::FileTime;

use crate::OpsError;

/// Create an empty file, or bump the modification time of an existing one.
///
/// The parent directory must already exist.
pub fn create_file(path: &Path) -> Result<(), OpsError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| OpsError::io(path, e))?;

    filetime::set_file_mtime(path, FileTime::now()).map_err(|e| OpsError::io(path, e))?;

    tracing::debug!(path = %path.display(), "touched file");
    Ok(())
}

/// Copy a file byte for byte, overwriting `destination` if present.
///
/// Returns the number of bytes copied. Copying a file onto itself, under any
/// spelling of its path, fails with [`OpsError::InvalidPath`] and leaves the
/// file untouched.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64, OpsError> {
    let metadata = fs::metadata(source).map_err(|e| OpsError::io(source, e))?;
    if !metadata.is_file() {
        return Err(OpsError::NotAFile {
            path: source.to_path_buf(),
        });
    }
    if is_same_file(source, destination)? {
        return Err(OpsError::InvalidPath {
            path: destination.to_path_buf(),
            message: format!("same file as {}", source.display()),
        });
    }

    let bytes = fs::copy(source, destination).map_err(|e| copy_error(source, destination, e))?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "copied file"
    );
    Ok(bytes)
}

/// Copy a file, then delete the source if the copy succeeded.
///
/// The outcome is the outcome of the copy. If the source cannot be removed
/// afterwards both files are left in place and a warning is logged.
pub fn move_file(source: &Path, destination: &Path) -> Result<u64, OpsError> {
    let bytes = copy_file(source, destination)?;

    if let Err(e) = delete_file(source) {
        tracing::warn!(
            source = %source.display(),
            destination = %destination.display(),
            error = %e,
            "file copied but source could not be removed"
        );
    }

    Ok(bytes)
}

/// Delete a single file or symlink. Directories are refused.
pub fn delete_file(path: &Path) -> Result<(), OpsError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| OpsError::io(path, e))?;
    if metadata.is_dir() {
        return Err(OpsError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    fs::remove_file(path).map_err(|e| OpsError::io(path, e))?;

    tracing::debug!(path = %path.display(), "deleted file");
    Ok(())
}

/// Whether `destination` already exists and resolves to the same file as
/// `source`. `fs::copy` truncates the destination before reading, so this
/// must be checked first.
fn is_same_file(source: &Path, destination: &Path) -> Result<bool, OpsError> {
    let target = match fs::metadata(destination) {
        Ok(target) => target,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(OpsError::io(destination, e)),
    };
    same_identity(source, destination, &target)
}

#[cfg(unix)]
fn same_identity(
    source: &Path,
    _destination: &Path,
    target: &fs::Metadata,
) -> Result<bool, OpsError> {
    use std::os::unix::fs::MetadataExt;
    let origin = fs::metadata(source).map_err(|e| OpsError::io(source, e))?;
    Ok(origin.dev() == target.dev() && origin.ino() == target.ino())
}

#[cfg(not(unix))]
fn same_identity(
    source: &Path,
    destination: &Path,
    _target: &fs::Metadata,
) -> Result<bool, OpsError> {
    let origin = fs::canonicalize(source).map_err(|e| OpsError::io(source, e))?;
    let target = fs::canonicalize(destination).map_err(|e| OpsError::io(destination, e))?;
    Ok(origin == target)
}

/// A missing destination parent is reported against the destination.
fn copy_error(source: &Path, destination: &Path, error: std::io::Error) -> OpsError {
    if error.kind() == std::io::ErrorKind::NotFound && source.exists() {
        OpsError::io(destination, error)
    } else {
        OpsError::io(source, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_create_file_touches_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("touched.txt");
        fs::write(&path, "keep me").unwrap();

        let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(3600));
        filetime::set_file_mtime(&path, old).unwrap();

        create_file(&path).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert!(FileTime::from_last_modification_time(&metadata) > old);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_create_file_missing_parent() {
        let temp = TempDir::new().unwrap();
        let err = create_file(&temp.path().join("no/such/file.txt")).unwrap_err();
        assert!(matches!(err, OpsError::NotFound { .. }));
    }

    #[test]
    fn test_copy_missing_destination_parent() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, "a").unwrap();
        let destination = temp.path().join("missing/a.txt");

        let err = copy_file(&source, &destination).unwrap_err();
        assert!(matches!(err, OpsError::NotFound { ref path } if path == &destination));
    }

    #[test]
    fn test_same_file_detection() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        let other = temp.path().join("b.txt");
        fs::write(&path, "a").unwrap();
        fs::write(&other, "b").unwrap();

        assert!(is_same_file(&path, &path).unwrap());
        assert!(is_same_file(&path, &temp.path().join(".").join("a.txt")).unwrap());
        assert!(!is_same_file(&path, &other).unwrap());
        assert!(!is_same_file(&path, &temp.path().join("missing.txt")).unwrap());
    }

    #[test]
    fn test_copy_directory_source_refused() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(temp.path(), &temp.path().join("x")).unwrap_err();
        assert!(matches!(err, OpsError::NotAFile { .. }));
    }

    #[test]
    fn test_delete_file_refuses_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).unwrap();

        let err = delete_file(&dir).unwrap_err();
        assert!(matches!(err, OpsError::NotAFile { .. }));
        assert!(dir.is_dir());
    }
}
