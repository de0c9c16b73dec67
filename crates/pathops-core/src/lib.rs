//! Core types for pathops.
//!
//! This crate provides the data structures shared by the scanner and the
//! operations engine: scan configuration, scan results and scan errors.

mod config;
mod error;
mod result;

pub use config::{DepthMode, ScanConfig, ScanConfigBuilder, segment_depth};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use result::{EntryKind, ScanEntries, ScanResult};
