// tests/executable_lookup.rs

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use nodeharness::errors::HarnessError;
use nodeharness::fs::MockFileSystem;
use nodeharness::pool::{Locator, SearchPath};
use nodeharness_test_utils::init_tracing;

fn locator(fs: MockFileSystem, dirs: &[&str]) -> Locator {
    Locator::new(SearchPath::new(dirs.iter().copied())).with_fs(Arc::new(fs))
}

#[test]
fn earlier_directories_win() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("/usr/local/bin/node", "");
    fs.add_file("/usr/bin/node", "");

    let path = locator(fs, &["/usr/local/bin", "/usr/bin"])
        .resolve("node")
        .unwrap();
    assert_eq!(path, PathBuf::from("/usr/local/bin/node"));
}

#[test]
fn extensions_are_tried_within_each_directory() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("/a/node.exe", "");
    fs.add_file("/b/node", "");

    // `/a` is searched with every suffix before moving on to `/b`.
    let path = locator(fs, &["/a", "/b"]).resolve("node").unwrap();
    assert_eq!(path, PathBuf::from("/a/node.exe"));
}

#[test]
fn custom_extensions_replace_the_defaults() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("/bin/tool.sh", "");
    fs.add_file("/bin/tool", "");

    let path = locator(fs, &["/bin"])
        .with_extensions([".sh"])
        .resolve("tool")
        .unwrap();
    assert_eq!(path, PathBuf::from("/bin/tool.sh"));
}

#[test]
fn directories_are_not_executables() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_dir("/opt/node");

    let err = locator(fs, &["/opt"]).resolve("node").unwrap_err();
    assert!(matches!(err, HarnessError::NotFound(_)));
}

#[test]
fn relative_search_dirs_resolve_to_absolute_paths() {
    init_tracing();

    let fs = MockFileSystem::with_cwd("/home/dev/build");
    fs.add_file("test_common", "");

    let path = locator(fs, &["."]).resolve("test_common").unwrap();
    assert!(path.is_absolute());
    assert_eq!(path, PathBuf::from("/home/dev/build/test_common"));
}

#[test]
fn missing_executable_and_empty_name_are_errors() {
    init_tracing();

    let err = locator(MockFileSystem::new(), &["/bin"])
        .resolve("nonexistent-binary")
        .unwrap_err();
    match err {
        HarnessError::NotFound(msg) => assert!(msg.contains("nonexistent-binary")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let err = locator(MockFileSystem::new(), &["/bin"]).resolve("").unwrap_err();
    assert!(matches!(err, HarnessError::InvalidArgument(_)));
}

#[test]
fn search_path_parses_platform_lists() {
    let joined: OsString = std::env::join_paths(["/one", "/two"]).unwrap();
    let search = SearchPath::parse(&joined);
    assert_eq!(
        search.dirs(),
        &[PathBuf::from("/one"), PathBuf::from("/two")]
    );
    assert!(SearchPath::default().is_empty());
}

#[test]
fn real_filesystem_lookup_in_temp_dir() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vault"), b"").unwrap();

    let path = Locator::new(SearchPath::new([dir.path()]))
        .resolve("vault")
        .unwrap();
    assert_eq!(path, dir.path().join("vault"));
    assert!(path.is_absolute());
}
