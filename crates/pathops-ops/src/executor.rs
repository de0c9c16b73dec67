//! The `PathOperations` facade and its unified operation dispatcher.

use std::path::Path;

use pathops_core::{ScanConfig, ScanResult};
use pathops_scan::BreadthFirstScanner;

use crate::directory;
use crate::file;
use crate::hooks::{NoHooks, OperationHooks};
use crate::{FileOperation, OpsError, TreeSummary};

/// What a finished operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationReport {
    /// A single-path operation finished.
    Done,
    /// A file was copied or moved.
    File { bytes: u64 },
    /// A recursive directory operation finished.
    Tree(TreeSummary),
    /// A scan finished.
    Scan(ScanResult),
}

/// File and directory operations plus a level-limited directory scanner.
///
/// The only state kept between calls is the scan configuration; a level
/// override passed to [`scan_directory`](Self::scan_directory) becomes the new
/// default. Each scan builds its own traversal state.
#[derive(Debug, Clone, Default)]
pub struct PathOperations<H = NoHooks> {
    config: ScanConfig,
    scanner: BreadthFirstScanner,
    hooks: H,
}

impl PathOperations<NoHooks> {
    /// Create a helper scanning the current directory by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a helper with the given scan configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            scanner: BreadthFirstScanner::new(),
            hooks: NoHooks,
        }
    }
}

impl<H: OperationHooks> PathOperations<H> {
    /// Replace the hooks notified around each operation.
    pub fn with_hooks<H2: OperationHooks>(self, hooks: H2) -> PathOperations<H2> {
        PathOperations {
            config: self.config,
            scanner: self.scanner,
            hooks,
        }
    }

    /// The current scan configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Set the default number of levels to scan.
    pub fn set_levels(&mut self, levels: u32) {
        self.config.levels = levels;
    }

    /// Create an empty file, or touch an existing one.
    pub fn create_file(&self, path: impl AsRef<Path>) -> Result<(), OpsError> {
        let path = path.as_ref();
        self.run(FileOperation::create_file(path), || file::create_file(path))
    }

    /// Copy a file, overwriting the destination. Returns bytes copied.
    pub fn copy_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<u64, OpsError> {
        let (source, destination) = (source.as_ref(), destination.as_ref());
        self.run(FileOperation::copy_file(source, destination), || {
            file::copy_file(source, destination)
        })
    }

    /// Copy a file, then delete the source. Returns bytes copied.
    pub fn move_file(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<u64, OpsError> {
        let (source, destination) = (source.as_ref(), destination.as_ref());
        self.run(FileOperation::move_file(source, destination), || {
            file::move_file(source, destination)
        })
    }

    /// Delete a single file.
    pub fn delete_file(&self, path: impl AsRef<Path>) -> Result<(), OpsError> {
        let path = path.as_ref();
        self.run(FileOperation::delete_file(path), || file::delete_file(path))
    }

    /// Create a directory and any missing ancestors.
    pub fn create_directory(&self, path: impl AsRef<Path>, recursive: bool) -> Result<(), OpsError> {
        let path = path.as_ref();
        self.run(FileOperation::create_directory(path, recursive), || {
            directory::create_directory(path, recursive)
        })
    }

    /// Copy a directory's contents into `destination`.
    pub fn copy_directory(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<TreeSummary, OpsError> {
        let (source, destination) = (source.as_ref(), destination.as_ref());
        self.run(
            FileOperation::copy_directory(source, destination, recursive),
            || directory::copy_directory(source, destination, recursive),
        )
    }

    /// Move a directory to `destination/<name of source>`.
    pub fn move_directory(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<TreeSummary, OpsError> {
        let (source, destination) = (source.as_ref(), destination.as_ref());
        self.run(FileOperation::move_directory(source, destination), || {
            directory::move_directory(source, destination)
        })
    }

    /// Delete a directory tree.
    pub fn delete_directory(
        &self,
        path: impl AsRef<Path>,
        strict: bool,
    ) -> Result<TreeSummary, OpsError> {
        let path = path.as_ref();
        self.run(FileOperation::delete_directory(path, strict), || {
            directory::delete_directory(path, strict)
        })
    }

    /// Scan a directory tree.
    ///
    /// `path` defaults to the configured root. A `levels` value replaces the
    /// configured default for this and later scans.
    pub fn scan_directory(
        &mut self,
        path: Option<&Path>,
        levels: Option<u32>,
    ) -> Result<ScanResult, OpsError> {
        if let Some(levels) = levels {
            self.config.levels = levels;
        }

        let operation = FileOperation::scan_directory(path.map(Path::to_path_buf), levels);
        let start = path.unwrap_or(self.config.root.as_path());
        self.run(operation, || {
            self.scanner
                .scan_from(&self.config, start)
                .map_err(OpsError::from)
        })
    }

    /// Scan the configured root with the configured levels.
    pub fn scan(&self) -> Result<ScanResult, OpsError> {
        self.run(FileOperation::scan_directory(None, None), || {
            self.scanner.scan(&self.config).map_err(OpsError::from)
        })
    }

    /// Run any operation described by a [`FileOperation`].
    pub fn execute(&mut self, operation: &FileOperation) -> Result<OperationReport, OpsError> {
        match operation {
            FileOperation::CreateFile { path } => {
                self.create_file(path).map(|()| OperationReport::Done)
            }
            FileOperation::CopyFile {
                source,
                destination,
            } => self
                .copy_file(source, destination)
                .map(|bytes| OperationReport::File { bytes }),
            FileOperation::MoveFile {
                source,
                destination,
            } => self
                .move_file(source, destination)
                .map(|bytes| OperationReport::File { bytes }),
            FileOperation::DeleteFile { path } => {
                self.delete_file(path).map(|()| OperationReport::Done)
            }
            FileOperation::CreateDirectory { path, recursive } => self
                .create_directory(path, *recursive)
                .map(|()| OperationReport::Done),
            FileOperation::CopyDirectory {
                source,
                destination,
                recursive,
            } => self
                .copy_directory(source, destination, *recursive)
                .map(OperationReport::Tree),
            FileOperation::MoveDirectory {
                source,
                destination,
            } => self
                .move_directory(source, destination)
                .map(OperationReport::Tree),
            FileOperation::DeleteDirectory { path, strict } => self
                .delete_directory(path, *strict)
                .map(OperationReport::Tree),
            FileOperation::ScanDirectory { path, levels } => self
                .scan_directory(path.as_deref(), *levels)
                .map(OperationReport::Scan),
        }
    }

    fn run<T>(
        &self,
        operation: FileOperation,
        f: impl FnOnce() -> Result<T, OpsError>,
    ) -> Result<T, OpsError> {
        self.hooks.before(&operation);
        let result = f();
        self.hooks.after(&operation, result.as_ref().map(|_| ()));
        result
    }
}
