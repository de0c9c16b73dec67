//! File operation types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The kind of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    #[strum(to_string = "Create file")]
    CreateFile,
    #[strum(to_string = "Copy file")]
    CopyFile,
    #[strum(to_string = "Move file")]
    MoveFile,
    #[strum(to_string = "Delete file")]
    DeleteFile,
    #[strum(to_string = "Create directory")]
    CreateDirectory,
    #[strum(to_string = "Copy directory")]
    CopyDirectory,
    #[strum(to_string = "Move directory")]
    MoveDirectory,
    #[strum(to_string = "Delete directory")]
    DeleteDirectory,
    #[strum(to_string = "Scan directory")]
    ScanDirectory,
}

/// A file operation to be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileOperation {
    /// Create an empty file, or touch an existing one.
    CreateFile { path: PathBuf },
    /// Copy a single file, overwriting the destination.
    CopyFile {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Copy a single file, then delete the source.
    MoveFile {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Delete a single file.
    DeleteFile { path: PathBuf },
    /// Create a directory and any missing ancestors.
    CreateDirectory { path: PathBuf, recursive: bool },
    /// Copy a directory's contents into a destination directory.
    CopyDirectory {
        source: PathBuf,
        destination: PathBuf,
        recursive: bool,
    },
    /// Move a directory beneath a destination directory.
    MoveDirectory {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Delete a directory tree.
    DeleteDirectory { path: PathBuf, strict: bool },
    /// Scan a directory tree.
    ScanDirectory {
        path: Option<PathBuf>,
        levels: Option<u32>,
    },
}

impl FileOperation {
    /// Create a file creation operation.
    pub fn create_file(path: impl Into<PathBuf>) -> Self {
        Self::CreateFile { path: path.into() }
    }

    /// Create a file copy operation.
    pub fn copy_file(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::CopyFile {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a file move operation.
    pub fn move_file(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::MoveFile {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a file deletion operation.
    pub fn delete_file(path: impl Into<PathBuf>) -> Self {
        Self::DeleteFile { path: path.into() }
    }

    /// Create a directory creation operation.
    pub fn create_directory(path: impl Into<PathBuf>, recursive: bool) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            recursive,
        }
    }

    /// Create a directory copy operation.
    pub fn copy_directory(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        recursive: bool,
    ) -> Self {
        Self::CopyDirectory {
            source: source.into(),
            destination: destination.into(),
            recursive,
        }
    }

    /// Create a directory move operation.
    pub fn move_directory(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::MoveDirectory {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Create a directory deletion operation.
    pub fn delete_directory(path: impl Into<PathBuf>, strict: bool) -> Self {
        Self::DeleteDirectory {
            path: path.into(),
            strict,
        }
    }

    /// Create a scan operation.
    pub fn scan_directory(path: Option<PathBuf>, levels: Option<u32>) -> Self {
        Self::ScanDirectory { path, levels }
    }

    /// The kind of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::CreateFile { .. } => OperationType::CreateFile,
            Self::CopyFile { .. } => OperationType::CopyFile,
            Self::MoveFile { .. } => OperationType::MoveFile,
            Self::DeleteFile { .. } => OperationType::DeleteFile,
            Self::CreateDirectory { .. } => OperationType::CreateDirectory,
            Self::CopyDirectory { .. } => OperationType::CopyDirectory,
            Self::MoveDirectory { .. } => OperationType::MoveDirectory,
            Self::DeleteDirectory { .. } => OperationType::DeleteDirectory,
            Self::ScanDirectory { .. } => OperationType::ScanDirectory,
        }
    }

    /// The primary path this operation acts on.
    pub fn target(&self) -> Option<&PathBuf> {
        match self {
            Self::CreateFile { path }
            | Self::DeleteFile { path }
            | Self::CreateDirectory { path, .. }
            | Self::DeleteDirectory { path, .. } => Some(path),
            Self::CopyFile { source, .. }
            | Self::MoveFile { source, .. }
            | Self::CopyDirectory { source, .. }
            | Self::MoveDirectory { source, .. } => Some(source),
            Self::ScanDirectory { path, .. } => path.as_ref(),
        }
    }
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CopyFile {
                source,
                destination,
            }
            | Self::MoveFile {
                source,
                destination,
            }
            | Self::CopyDirectory {
                source,
                destination,
                ..
            }
            | Self::MoveDirectory {
                source,
                destination,
            } => write!(
                f,
                "{} {} -> {}",
                self.operation_type(),
                source.display(),
                destination.display()
            ),
            _ => match self.target() {
                Some(path) => write!(f, "{} {}", self.operation_type(), path.display()),
                None => write!(f, "{}", self.operation_type()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_operation_type_names() {
        assert_eq!(OperationType::CreateFile.to_string(), "Create file");
        assert_eq!(OperationType::MoveDirectory.to_string(), "Move directory");
        assert_eq!(OperationType::iter().count(), 9);
    }

    #[test]
    fn test_display() {
        let op = FileOperation::move_directory("out/start", "out/end");
        assert_eq!(op.to_string(), "Move directory out/start -> out/end");
        assert_eq!(op.operation_type(), OperationType::MoveDirectory);

        let op = FileOperation::scan_directory(None, Some(2));
        assert_eq!(op.to_string(), "Scan directory");
        assert!(op.target().is_none());
    }
}
