//! Directory scanning engine for pathops.
//!
//! The scanner walks a directory subtree breadth-first, one directory at a
//! time, and sorts what it finds into files, directories and symbolic links.
//! How far it descends is bounded by [`ScanConfig::levels`].
//!
//! # Example
//!
//! ```rust,no_run
//! use pathops_scan::{BreadthFirstScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan").with_levels(2);
//! let result = BreadthFirstScanner::new().scan(&config).unwrap();
//!
//! println!("{} files, {} dirs", result.file_count, result.dir_count);
//! for dir in result.dirs() {
//!     println!("{}", dir.display());
//! }
//! ```

mod scanner;
mod state;

pub use scanner::BreadthFirstScanner;

// Re-export core types for convenience
pub use pathops_core::{
    DepthMode, EntryKind, ScanConfig, ScanEntries, ScanError, ScanResult, ScanWarning,
    WarningKind,
};
