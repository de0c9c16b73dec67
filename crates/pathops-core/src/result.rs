//! Scan result types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// Classification of a directory entry as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// Every path discovered by a scan, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntries {
    /// Regular files.
    pub files: Vec<PathBuf>,
    /// Directories, in breadth-first order.
    pub dirs: Vec<PathBuf>,
    /// Symbolic links (never followed).
    pub links: Vec<PathBuf>,
}

impl ScanEntries {
    /// Create an empty set of entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered path under its kind.
    pub fn record(&mut self, kind: EntryKind, path: PathBuf) {
        match kind {
            EntryKind::File => self.files.push(path),
            EntryKind::Directory => self.dirs.push(path),
            EntryKind::Symlink => self.links.push(path),
        }
    }

    /// Total number of recorded paths.
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.len() + self.links.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one scan call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Number of regular files found.
    pub file_count: usize,
    /// Number of directories found.
    pub dir_count: usize,
    /// Number of symbolic links found.
    pub link_count: usize,
    /// Full path lists, present when extended results were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<ScanEntries>,
    /// Directories that were skipped because they could not be read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    /// Build a result from accumulated entries.
    pub fn from_entries(entries: ScanEntries, extended: bool, warnings: Vec<ScanWarning>) -> Self {
        Self {
            file_count: entries.files.len(),
            dir_count: entries.dirs.len(),
            link_count: entries.links.len(),
            entries: extended.then_some(entries),
            warnings,
        }
    }

    /// Total number of entries found.
    pub fn total(&self) -> usize {
        self.file_count + self.dir_count + self.link_count
    }

    /// Discovered files, empty when results are not extended.
    pub fn files(&self) -> &[PathBuf] {
        self.entries.as_ref().map_or(&[], |e| e.files.as_slice())
    }

    /// Discovered directories, empty when results are not extended.
    pub fn dirs(&self) -> &[PathBuf] {
        self.entries.as_ref().map_or(&[], |e| e.dirs.as_slice())
    }

    /// Discovered links, empty when results are not extended.
    pub fn links(&self) -> &[PathBuf] {
        self.entries.as_ref().map_or(&[], |e| e.links.as_slice())
    }
}
