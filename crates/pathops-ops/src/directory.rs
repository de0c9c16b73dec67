//! Recursive directory operations.
//!
//! Copy and delete walk the tree depth-first with `read_dir`. A fault stops
//! the walk where it happened: whatever was already copied or removed stays
//! that way, and the error reports how far the walk got.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{OpsError, TreeSummary};

/// Create a directory and all missing ancestors.
///
/// `recursive` is accepted for symmetry with the other operations, but
/// ancestors are created either way. Fails with
/// [`OpsError::AlreadyExists`] if something is already at `path`.
pub fn create_directory(path: &Path, recursive: bool) -> Result<(), OpsError> {
    if fs::symlink_metadata(path).is_ok() {
        return Err(OpsError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if !recursive {
        tracing::debug!(path = %path.display(), "non-recursive create still creates ancestors");
    }

    create_dir_tree(path).map_err(|e| OpsError::io(path, e))?;

    tracing::debug!(path = %path.display(), "created directory");
    Ok(())
}

/// Copy the contents of `source` into `destination`, creating it if needed.
///
/// Subdirectories are always created in the destination; their contents are
/// copied only when `recursive` is set. Regular files are copied over any
/// existing destination file. Symlinks and special files are skipped.
pub fn copy_directory(
    source: &Path,
    destination: &Path,
    recursive: bool,
) -> Result<TreeSummary, OpsError> {
    require_directory(source)?;
    ensure_outside(source, destination)?;

    let mut summary = TreeSummary::default();
    match copy_tree(source, destination, recursive, &mut summary) {
        Ok(()) => {
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                files = summary.files,
                directories = summary.directories,
                skipped = summary.skipped,
                "copied directory"
            );
            Ok(summary)
        }
        Err(e) => Err(OpsError::partial(source, summary, e)),
    }
}

/// Move `source` beneath `destination`, keeping its name.
///
/// `move_directory("a/b", "c")` produces `c/b`. The tree is copied in full
/// and the source is deleted only after the copy succeeded; there is no
/// rename fast path.
pub fn move_directory(source: &Path, destination: &Path) -> Result<TreeSummary, OpsError> {
    let name = source.file_name().ok_or_else(|| OpsError::InvalidPath {
        path: source.to_path_buf(),
        message: "path has no final component".to_string(),
    })?;
    let target = destination.join(name);

    let summary = copy_directory(source, &target, true)?;
    delete_directory(source, false)?;

    tracing::debug!(
        source = %source.display(),
        target = %target.display(),
        "moved directory"
    );
    Ok(summary)
}

/// Delete a directory and everything beneath it.
///
/// A missing `path` is a success unless `strict` is set, in which case it is
/// [`OpsError::NotFound`]. Symlinks inside the tree are unlinked, never
/// followed.
pub fn delete_directory(path: &Path, strict: bool) -> Result<TreeSummary, OpsError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if strict {
                return Err(OpsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            tracing::debug!(path = %path.display(), "nothing to delete");
            return Ok(TreeSummary::default());
        }
        Err(e) => return Err(OpsError::io(path, e)),
    };
    if !metadata.is_dir() {
        return Err(OpsError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let mut summary = TreeSummary::default();
    match remove_tree(path, &mut summary) {
        Ok(()) => {
            tracing::debug!(
                path = %path.display(),
                files = summary.files,
                directories = summary.directories,
                links = summary.links,
                "deleted directory"
            );
            Ok(summary)
        }
        Err(e) => Err(OpsError::partial(path, summary, e)),
    }
}

fn copy_tree(
    source: &Path,
    destination: &Path,
    recursive: bool,
    summary: &mut TreeSummary,
) -> Result<(), OpsError> {
    ensure_directory(destination)?;

    for entry in fs::read_dir(source).map_err(|e| OpsError::io(source, e))? {
        let entry = entry.map_err(|e| OpsError::io(source, e))?;
        let from = entry.path();
        let to = destination.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| OpsError::io(&from, e))?;

        if file_type.is_dir() {
            ensure_directory(&to)?;
            summary.add_directory();
            if recursive {
                copy_tree(&from, &to, recursive, summary)?;
            }
        } else if file_type.is_file() {
            let bytes = fs::copy(&from, &to).map_err(|e| OpsError::io(&from, e))?;
            summary.add_file(bytes);
        } else {
            tracing::debug!(path = %from.display(), "skipping non-regular entry");
            summary.add_skipped();
        }
    }

    Ok(())
}

fn remove_tree(path: &Path, summary: &mut TreeSummary) -> Result<(), OpsError> {
    for entry in fs::read_dir(path).map_err(|e| OpsError::io(path, e))? {
        let entry = entry.map_err(|e| OpsError::io(path, e))?;
        let child = entry.path();
        let file_type = entry.file_type().map_err(|e| OpsError::io(&child, e))?;

        if file_type.is_dir() {
            remove_tree(&child, summary)?;
            summary.add_directory();
        } else {
            fs::remove_file(&child).map_err(|e| OpsError::io(&child, e))?;
            if file_type.is_file() {
                summary.add_file(0);
            } else {
                summary.add_link();
            }
        }
    }

    fs::remove_dir(path).map_err(|e| OpsError::io(path, e))
}

fn require_directory(path: &Path) -> Result<(), OpsError> {
    let metadata = fs::metadata(path).map_err(|e| OpsError::io(path, e))?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(OpsError::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}

fn ensure_directory(path: &Path) -> Result<(), OpsError> {
    if path.is_dir() {
        return Ok(());
    }
    create_dir_tree(path).map_err(|e| OpsError::io(path, e))
}

/// Refuse destinations inside (or equal to) the source, which would make the
/// copy feed on its own output.
///
/// Paths are compared both as written and with symlinks resolved, so a
/// destination reached through a link into the source is caught too.
fn ensure_outside(source: &Path, destination: &Path) -> Result<(), OpsError> {
    let source_abs = lexical_absolute(source)?;
    let destination_abs = lexical_absolute(destination)?;

    let inside = destination_abs.starts_with(&source_abs) || {
        let source_real = fs::canonicalize(source).map_err(|e| OpsError::io(source, e))?;
        resolve_existing_prefix(&destination_abs)?.starts_with(&source_real)
    };

    if inside {
        return Err(OpsError::DestinationInsideSource {
            source_dir: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing ancestor of an absolute path and append
/// the components that do not exist yet.
fn resolve_existing_prefix(path: &Path) -> Result<PathBuf, OpsError> {
    let mut existing = path;
    let mut missing = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name);
                        existing = parent;
                    }
                    _ => return Ok(path.to_path_buf()),
                }
            }
            Err(e) => return Err(OpsError::io(existing, e)),
        }
    }
}

/// Absolute form of `path` with `.` and `..` folded away, without touching
/// the filesystem.
fn lexical_absolute(path: &Path) -> Result<PathBuf, OpsError> {
    let absolute = std::path::absolute(path).map_err(|e| OpsError::io(path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// `mkdir -p` with mode 0777 before umask.
fn create_dir_tree(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}
