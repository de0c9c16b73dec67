//! Level-limited breadth-first directory scanner.

use std::fs::{self, FileType};
use std::path::{Path, PathBuf};
use std::time::Instant;

use pathops_core::{EntryKind, ScanConfig, ScanError, ScanResult, ScanWarning};

use crate::state::{PendingDir, ScanState};

/// Scanner that enumerates a directory subtree into files, directories and
/// links, reading one directory at a time in FIFO order.
///
/// The scanner holds no traversal state of its own; every call to
/// [`scan`](Self::scan) works on a fresh queue, so one scanner can serve
/// any number of scans, including concurrent ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstScanner;

impl BreadthFirstScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan starting at the configured root.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        self.scan_from(config, &config.root)
    }

    /// Scan starting at `start`, measuring depth against the configured root
    /// when [`DepthMode::PathSegments`](pathops_core::DepthMode) is in effect.
    pub fn scan_from(&self, config: &ScanConfig, start: &Path) -> Result<ScanResult, ScanError> {
        let started = Instant::now();

        if config.root.as_os_str().is_empty() || start.as_os_str().is_empty() {
            return Err(ScanError::InvalidConfig {
                message: "scan root must not be empty".to_string(),
            });
        }

        let metadata = fs::metadata(start).map_err(|e| ScanError::io(start, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: start.to_path_buf(),
            });
        }

        let mut state = ScanState::new(config, start);

        while let Some(dir) = state.next_pending() {
            if !state.within_limit(dir.level) {
                continue;
            }

            let listing = match read_listing(&dir.path) {
                Ok(listing) => listing,
                Err(err) if config.skip_unreadable => {
                    tracing::warn!(path = %dir.path.display(), error = %err, "skipping unreadable directory");
                    state.warnings.push(ScanWarning::from_io(&dir.path, &err));
                    continue;
                }
                Err(err) => return Err(ScanError::io(&dir.path, err)),
            };

            record_listing(&mut state, &dir, listing);
        }

        let result = ScanResult::from_entries(state.entries, config.extended, state.warnings);
        tracing::debug!(
            start = %start.display(),
            files = result.file_count,
            dirs = result.dir_count,
            links = result.link_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(result)
    }
}

/// Read the immediate entries of `dir`, sorted by name.
///
/// The whole listing is read before anything is recorded, so a directory
/// that fails halfway contributes nothing.
fn read_listing(dir: &Path) -> std::io::Result<Vec<(PathBuf, FileType)>> {
    let mut listing = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        listing.push((entry.path(), entry.file_type()?));
    }
    listing.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(listing)
}

fn record_listing(state: &mut ScanState, dir: &PendingDir, listing: Vec<(PathBuf, FileType)>) {
    for (path, file_type) in listing {
        match classify(file_type) {
            Some(kind) => state.record(dir, kind, path),
            None => tracing::debug!(path = %path.display(), "skipping special file"),
        }
    }
}

/// Classify without following symlinks.
fn classify(file_type: FileType) -> Option<EntryKind> {
    if file_type.is_symlink() {
        Some(EntryKind::Symlink)
    } else if file_type.is_dir() {
        Some(EntryKind::Directory)
    } else if file_type.is_file() {
        Some(EntryKind::File)
    } else {
        None
    }
}
