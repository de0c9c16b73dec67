//! Summary of what a recursive operation did.

use serde::{Deserialize, Serialize};

use crate::operation::OperationType;

/// Counts of entries processed beneath the root of a recursive copy, move
/// or delete. The root directory itself is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Regular files copied or removed.
    pub files: usize,
    /// Subdirectories created or removed.
    pub directories: usize,
    /// Symlinks and special files removed.
    pub links: usize,
    /// Entries left alone because they are neither files nor directories.
    pub skipped: usize,
    /// Bytes copied (copies only).
    pub bytes: u64,
}

impl TreeSummary {
    /// Whether nothing has been processed.
    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.directories == 0 && self.links == 0 && self.skipped == 0
    }

    /// Record a processed file.
    pub fn add_file(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }

    /// Record a processed subdirectory.
    pub fn add_directory(&mut self) {
        self.directories += 1;
    }

    /// Record a removed symlink or special file.
    pub fn add_link(&mut self) {
        self.links += 1;
    }

    /// Record a skipped entry.
    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self, operation_type: OperationType) -> String {
        let action = match operation_type {
            OperationType::CopyDirectory | OperationType::CopyFile => "Copied",
            OperationType::MoveDirectory | OperationType::MoveFile => "Moved",
            OperationType::DeleteDirectory | OperationType::DeleteFile => "Deleted",
            OperationType::CreateDirectory | OperationType::CreateFile => "Created",
            OperationType::ScanDirectory => "Scanned",
        };

        let mut line = format!("{action} {self}");
        if self.links > 0 {
            line.push_str(&format!(", {} links", self.links));
        }
        if self.skipped > 0 {
            line.push_str(&format!(", skipped {}", self.skipped));
        }
        line
    }
}

impl std::fmt::Display for TreeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} files, {} directories", self.files, self.directories)
    }
}
