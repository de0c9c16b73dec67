//! Error type for file and directory operations.

use std::path::PathBuf;

use pathops_core::ScanError;
use thiserror::Error;

use crate::summary::TreeSummary;

/// An error that occurred during a file operation.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path already exists.
    #[error("Path already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Expected a file but found something else.
    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Expected a directory but found something else.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The path cannot be used for this operation.
    #[error("Invalid path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Cannot copy a directory into itself.
    #[error("Cannot copy {source_dir} into its own subtree at {destination}")]
    DestinationInsideSource {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recursive operation faulted after processing some entries.
    ///
    /// Entries already processed stay in their new state.
    #[error("{path}: failed after {completed}: {source}")]
    PartialFailure {
        path: PathBuf,
        completed: TreeSummary,
        #[source]
        source: Box<OpsError>,
    },

    /// A scan failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl OpsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Wrap a fault from a recursive operation rooted at `path`.
    ///
    /// When nothing was processed yet the fault is returned unchanged.
    pub fn partial(path: impl Into<PathBuf>, completed: TreeSummary, source: OpsError) -> Self {
        if completed.is_empty() {
            return source;
        }
        Self::PartialFailure {
            path: path.into(),
            completed,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through partial failures.
    pub fn root_cause(&self) -> &OpsError {
        match self {
            Self::PartialFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error means a path was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::NotFound { .. } | Self::Scan(ScanError::NotFound { .. })
        )
    }
}
