//! Scan configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// How the depth of a queued directory is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthMode {
    /// Depth is the number of directory hops from the start path, carried
    /// through the traversal queue alongside each pending directory.
    #[default]
    Hops,
    /// Depth is the number of separator-delimited segments in the path string.
    ///
    /// The configured root's segment count is the baseline. Results depend on
    /// how paths are spelled: `out` and `out/` have different segment counts,
    /// and so do relative and absolute spellings of the same directory.
    PathSegments,
}

/// Configuration for scanning operations.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan, and the depth baseline for [`DepthMode::PathSegments`].
    pub root: PathBuf,

    /// Number of directory levels below the start path to read.
    ///
    /// `1` reads only the start directory itself, reporting its immediate
    /// children without descending into them.
    #[builder(default = "1")]
    #[serde(default = "default_levels")]
    pub levels: u32,

    /// Include the full path lists in the result, not just the counts.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub extended: bool,

    /// How directory depth is measured.
    #[builder(default)]
    #[serde(default)]
    pub depth_mode: DepthMode,

    /// Record a warning and keep going when a directory cannot be read,
    /// instead of failing the whole scan.
    #[builder(default = "false")]
    #[serde(default)]
    pub skip_unreadable: bool,
}

fn default_true() -> bool {
    true
}

fn default_levels() -> u32 {
    1
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            levels: 1,
            extended: true,
            depth_mode: DepthMode::Hops,
            skip_unreadable: false,
        }
    }

    /// Replace the level limit, returning the updated config.
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Replace the depth mode, returning the updated config.
    pub fn with_depth_mode(mut self, depth_mode: DepthMode) -> Self {
        self.depth_mode = depth_mode;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Count the separator-delimited segments of a path string.
///
/// Empty segments count too, so `/a/b` has three segments and `a/b/` has
/// three as well.
pub fn segment_depth(path: &Path) -> usize {
    path.as_os_str()
        .to_string_lossy()
        .split(std::path::is_separator)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .levels(3u32)
            .depth_mode(DepthMode::PathSegments)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.levels, 3);
        assert!(config.extended);
        assert!(!config.skip_unreadable);
        assert_eq!(config.depth_mode, DepthMode::PathSegments);
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanConfig::builder().root("").build().is_err());
        assert!(ScanConfig::builder().build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.levels, 1);
        assert!(config.extended);
        assert_eq!(config.depth_mode, DepthMode::Hops);
        assert_eq!(ScanConfig::default().root, PathBuf::from("."));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"root": "out"}"#).unwrap();
        assert_eq!(config, ScanConfig::new("out"));

        let config: ScanConfig =
            serde_json::from_str(r#"{"root": "out", "levels": 2, "depth_mode": "path_segments"}"#)
                .unwrap();
        assert_eq!(config.levels, 2);
        assert_eq!(config.depth_mode, DepthMode::PathSegments);
    }

    #[cfg(unix)]
    #[test]
    fn test_segment_depth() {
        assert_eq!(segment_depth(Path::new("out")), 1);
        assert_eq!(segment_depth(Path::new("out/a")), 2);
        assert_eq!(segment_depth(Path::new("out/")), 2);
        assert_eq!(segment_depth(Path::new("/out/a")), 3);
    }
}
