//! File and directory operations engine for pathops.
//!
//! Single-file operations (create, copy, move, delete), recursive directory
//! operations, and a facade, [`PathOperations`], that wraps them together with
//! the level-limited scanner from `pathops-scan`.
//!
//! Moves are always copy-then-delete. Recursive operations stop at the first
//! fault and report how far they got through [`OpsError::PartialFailure`];
//! nothing is rolled back.
//!
//! ```rust,no_run
//! use pathops_ops::PathOperations;
//!
//! let ops = PathOperations::new();
//! ops.create_directory("out/start", true)?;
//! ops.create_file("out/start/notes.txt")?;
//! ops.create_directory("out/end", true)?;
//! ops.move_directory("out/start", "out/end")?; // now out/end/start
//! # Ok::<(), pathops_ops::OpsError>(())
//! ```

mod directory;
mod error;
mod executor;
mod file;
mod hooks;
mod operation;
mod summary;

pub use directory::{copy_directory, create_directory, delete_directory, move_directory};
pub use error::OpsError;
pub use executor::{OperationReport, PathOperations};
pub use file::{copy_file, create_file, delete_file, move_file};
pub use hooks::{LoggingHooks, NoHooks, OperationHooks};
pub use operation::{FileOperation, OperationType};
pub use summary::TreeSummary;

pub use pathops_core::{DepthMode, ScanConfig, ScanResult};
