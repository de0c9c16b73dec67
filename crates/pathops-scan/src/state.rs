//! Per-call traversal state.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use pathops_core::{DepthMode, EntryKind, ScanConfig, ScanEntries, ScanWarning, segment_depth};

/// A directory waiting to be read, paired with its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingDir {
    pub path: PathBuf,
    pub level: usize,
}

/// Queue and accumulators for one scan invocation.
///
/// A fresh state is built for every scan, so nothing carries over between
/// calls and concurrent scans never share accumulators.
#[derive(Debug)]
pub(crate) struct ScanState {
    depth_mode: DepthMode,
    end_level: usize,
    pending: VecDeque<PendingDir>,
    pub entries: ScanEntries,
    pub warnings: Vec<ScanWarning>,
}

impl ScanState {
    /// Set up the level window for `config` and seed the queue with `start`.
    pub fn new(config: &ScanConfig, start: &Path) -> Self {
        let levels = config.levels as usize;
        let (start_level, seed_level) = match config.depth_mode {
            DepthMode::Hops => (0, 0),
            DepthMode::PathSegments => (segment_depth(&config.root), segment_depth(start)),
        };

        let mut pending = VecDeque::new();
        pending.push_back(PendingDir {
            path: start.to_path_buf(),
            level: seed_level,
        });

        Self {
            depth_mode: config.depth_mode,
            end_level: start_level.saturating_add(levels),
            pending,
            entries: ScanEntries::new(),
            warnings: Vec::new(),
        }
    }

    /// Take the next directory in breadth-first order.
    pub fn next_pending(&mut self) -> Option<PendingDir> {
        self.pending.pop_front()
    }

    /// Whether a directory at `level` should have its entries read.
    pub fn within_limit(&self, level: usize) -> bool {
        level < self.end_level
    }

    /// Record an entry found inside `parent`, queueing directories.
    pub fn record(&mut self, parent: &PendingDir, kind: EntryKind, path: PathBuf) {
        if kind == EntryKind::Directory {
            let level = match self.depth_mode {
                DepthMode::Hops => parent.level + 1,
                DepthMode::PathSegments => segment_depth(&path),
            };
            self.pending.push_back(PendingDir {
                path: path.clone(),
                level,
            });
        }
        self.entries.record(kind, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hops_window() {
        let config = ScanConfig::new("root").with_levels(2);
        let mut state = ScanState::new(&config, Path::new("root"));

        let root = state.next_pending().unwrap();
        assert_eq!(root.level, 0);
        assert!(state.within_limit(root.level));

        state.record(&root, EntryKind::Directory, PathBuf::from("root/a"));
        state.record(&root, EntryKind::File, PathBuf::from("root/f"));

        let child = state.next_pending().unwrap();
        assert_eq!(child.level, 1);
        assert!(state.within_limit(child.level));
        assert!(!state.within_limit(2));
        assert!(state.next_pending().is_none());
        assert_eq!(state.entries.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_segment_window() {
        let config = ScanConfig::new("out/root").with_depth_mode(DepthMode::PathSegments);
        let mut state = ScanState::new(&config, Path::new("out/root"));

        let root = state.next_pending().unwrap();
        assert_eq!(root.level, 2);
        assert!(state.within_limit(root.level));

        state.record(&root, EntryKind::Directory, PathBuf::from("out/root/a"));
        let child = state.next_pending().unwrap();
        assert_eq!(child.level, 3);
        assert!(!state.within_limit(child.level));
    }

    #[test]
    fn test_zero_levels_reads_nothing() {
        let config = ScanConfig::new("root").with_levels(0);
        let mut state = ScanState::new(&config, Path::new("root"));
        let root = state.next_pending().unwrap();
        assert!(!state.within_limit(root.level));
    }
}
