use pathops_scan::{BreadthFirstScanner, DepthMode, ScanConfig, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// root/A/file.txt and root/B/C
fn create_ab_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("A")).unwrap();
    fs::create_dir_all(root.join("B/C")).unwrap();
    fs::write(root.join("A/file.txt"), "content").unwrap();

    temp
}

#[test]
fn test_one_level_stays_at_root() {
    let temp = create_ab_tree();
    let root = temp.path();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(root).with_levels(1))
        .unwrap();

    assert_eq!(result.dirs(), &[root.join("A"), root.join("B")]);
    assert!(result.files().is_empty());
    assert_eq!(result.file_count, 0);
    assert_eq!(result.dir_count, 2);
}

#[test]
fn test_two_levels_descends_once() {
    let temp = create_ab_tree();
    let root = temp.path();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(root).with_levels(2))
        .unwrap();

    assert_eq!(
        result.dirs(),
        &[root.join("A"), root.join("B"), root.join("B/C")]
    );
    assert_eq!(result.files(), &[root.join("A/file.txt")]);
}

#[test]
fn test_empty_directory_yields_zero_counts() {
    let temp = TempDir::new().unwrap();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(temp.path()).with_levels(5))
        .unwrap();

    assert_eq!(result.file_count, 0);
    assert_eq!(result.dir_count, 0);
    assert_eq!(result.link_count, 0);
    assert_eq!(result.total(), 0);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_zero_levels_reports_nothing() {
    let temp = create_ab_tree();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(temp.path()).with_levels(0))
        .unwrap();

    assert_eq!(result.total(), 0);
}

#[test]
fn test_counts_only() {
    let temp = create_ab_tree();
    let config = ScanConfig::builder()
        .root(temp.path())
        .levels(3u32)
        .extended(false)
        .build()
        .unwrap();

    let result = BreadthFirstScanner::new().scan(&config).unwrap();

    assert_eq!(result.dir_count, 3);
    assert_eq!(result.file_count, 1);
    assert!(result.entries.is_none());
}

#[test]
fn test_repeated_scans_do_not_accumulate() {
    let temp = create_ab_tree();
    let scanner = BreadthFirstScanner::new();
    let config = ScanConfig::new(temp.path()).with_levels(2);

    let first = scanner.scan(&config).unwrap();
    let second = scanner.scan(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.dir_count, 3);
}

#[test]
fn test_concurrent_scans_are_independent() {
    let one = create_ab_tree();
    let two = TempDir::new().unwrap();
    fs::write(two.path().join("only.txt"), "x").unwrap();

    let scanner = BreadthFirstScanner::new();
    let (a, b) = std::thread::scope(|s| {
        let a = s.spawn(|| scanner.scan(&ScanConfig::new(one.path()).with_levels(2)));
        let b = s.spawn(|| scanner.scan(&ScanConfig::new(two.path())));
        (a.join().unwrap().unwrap(), b.join().unwrap().unwrap())
    });

    assert_eq!(a.dir_count, 3);
    assert_eq!(a.file_count, 1);
    assert_eq!(b.dir_count, 0);
    assert_eq!(b.files(), &[two.path().join("only.txt")]);
}

#[cfg(unix)]
#[test]
fn test_symlinks_recorded_not_followed() {
    let temp = create_ab_tree();
    let root = temp.path();
    std::os::unix::fs::symlink(root.join("A"), root.join("link_to_a")).unwrap();
    std::os::unix::fs::symlink(root.join("A/file.txt"), root.join("link_to_file")).unwrap();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(root).with_levels(3))
        .unwrap();

    assert_eq!(
        result.links(),
        &[root.join("link_to_a"), root.join("link_to_file")]
    );
    // The linked directory is not entered a second time.
    assert_eq!(result.files(), &[root.join("A/file.txt")]);
    assert_eq!(result.dir_count, 3);
}

#[cfg(unix)]
#[test]
fn test_path_segments_from_configured_root() {
    let temp = create_ab_tree();
    let root = temp.path();
    let config = ScanConfig::new(root)
        .with_levels(1)
        .with_depth_mode(DepthMode::PathSegments);

    let result = BreadthFirstScanner::new().scan(&config).unwrap();
    assert_eq!(result.dirs(), &[root.join("A"), root.join("B")]);
    assert!(result.files().is_empty());

    // Starting one level down exhausts the window immediately.
    let result = BreadthFirstScanner::new()
        .scan_from(&config, &root.join("B"))
        .unwrap();
    assert_eq!(result.total(), 0);

    // Hop counting is relative to the start path instead.
    let hops = ScanConfig::new(root).with_levels(1);
    let result = BreadthFirstScanner::new()
        .scan_from(&hops, &root.join("B"))
        .unwrap();
    assert_eq!(result.dirs(), &[root.join("B/C")]);
}

#[cfg(unix)]
#[test]
fn test_path_segments_trailing_separator_shifts_window() {
    let temp = create_ab_tree();
    let root = temp.path();

    // "root/" has one more segment than the children it produces, so the
    // children land inside the window and get read.
    let mut spelled = root.as_os_str().to_owned();
    spelled.push("/");
    let spelled = PathBuf::from(spelled);

    let config = ScanConfig::new(&spelled)
        .with_levels(1)
        .with_depth_mode(DepthMode::PathSegments);
    let result = BreadthFirstScanner::new().scan(&config).unwrap();

    assert_eq!(result.dir_count, 3);
    assert_eq!(result.file_count, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let temp = create_ab_tree();
    let root = temp.path();
    let locked = root.join("B");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read it anyway; nothing to check then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let strict = ScanConfig::new(root).with_levels(2);
    let err = BreadthFirstScanner::new().scan(&strict).unwrap_err();
    assert!(matches!(err, ScanError::PermissionDenied { ref path } if path == &locked));

    let lenient = ScanConfig::builder()
        .root(root)
        .levels(2u32)
        .skip_unreadable(true)
        .build()
        .unwrap();
    let result = BreadthFirstScanner::new().scan(&lenient).unwrap();
    assert_eq!(result.files(), &[root.join("A/file.txt")]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, locked);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_relative_and_absolute_paths_reported_as_given() {
    let temp = create_ab_tree();
    let root: &Path = temp.path();

    let result = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(root))
        .unwrap();

    for dir in result.dirs() {
        assert!(dir.starts_with(root));
    }
}

#[test]
fn test_empty_root_is_invalid_config() {
    let err = BreadthFirstScanner::new()
        .scan(&ScanConfig::new(""))
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidConfig { .. }));

    let config: ScanConfig = serde_json::from_str(r#"{"root": ""}"#).unwrap();
    let err = BreadthFirstScanner::new().scan(&config).unwrap_err();
    assert!(matches!(err, ScanError::InvalidConfig { .. }));
}

#[test]
fn test_empty_start_path_is_invalid_config() {
    let temp = create_ab_tree();
    let err = BreadthFirstScanner::new()
        .scan_from(&ScanConfig::new(temp.path()), Path::new(""))
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidConfig { .. }));
}
