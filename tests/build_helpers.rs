// tests/build_helpers.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use nodeharness::build_info::{BuildType, detect_build_type, program_path};
use nodeharness::components::ComponentMap;
use nodeharness::duration::parse_duration;
use nodeharness::errors::HarnessError;
use nodeharness::fs::{MockFileSystem, RealFileSystem};

#[test]
fn build_type_is_read_from_cmake_cache() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "/work/CMakeCache.txt",
        "CMAKE_AR:FILEPATH=/usr/bin/ar\nCMAKE_BUILD_TYPE:STRING=Release\n",
    );

    let found = detect_build_type(&fs, Path::new("/work")).unwrap();
    assert_eq!(found, Some(BuildType::Release));
}

#[test]
fn cache_without_build_type_yields_none() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/CMakeCache.txt", "CMAKE_BUILD_TYPE:STRING=\n");

    assert_eq!(detect_build_type(&fs, Path::new("/work")).unwrap(), None);
}

#[test]
fn missing_cache_is_an_io_error() {
    let fs = MockFileSystem::new();
    let err = detect_build_type(&fs, Path::new("/work")).unwrap_err();
    assert!(matches!(err, HarnessError::Io(_)));
}

#[test]
fn build_type_from_real_build_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("CMakeCache.txt"),
        "CMAKE_BUILD_TYPE:STRING=Debug\n",
    )
    .unwrap();

    let found = detect_build_type(&RealFileSystem, dir.path()).unwrap();
    assert_eq!(found, Some(BuildType::Debug));
}

#[test]
fn build_type_accepts_short_codes() {
    assert_eq!("d".parse::<BuildType>().unwrap(), BuildType::Debug);
    assert_eq!("R".parse::<BuildType>().unwrap(), BuildType::Release);
    assert_eq!("rwdi".parse::<BuildType>().unwrap(), BuildType::RelWithDebInfo);
    assert_eq!("MinSizeRel".parse::<BuildType>().unwrap(), BuildType::MinSizeRel);
    assert!("fast".parse::<BuildType>().is_err());
    assert_eq!(BuildType::RelWithDebInfo.to_string(), "RelWithDebInfo");
}

#[test]
fn program_path_adds_platform_suffix() {
    let path = program_path(Path::new("."), "test_common");
    if cfg!(windows) {
        assert_eq!(path, PathBuf::from("./test_common.exe"));
    } else {
        assert_eq!(path, PathBuf::from("./test_common"));
    }
}

#[test]
fn default_components_map_names_to_directories() {
    let map = ComponentMap::default();

    assert_eq!(map.len(), 8);
    assert_eq!(map.directory("Routing"), Some("routing"));
    assert_eq!(map.directory("routing"), Some("routing"));
    assert_eq!(map.directory("LIFESTUFF"), Some("lifestuff"));
    assert_eq!(map.directory("kernel"), None);
    assert_eq!(
        map.source_dir(Path::new("/repo"), "Drive"),
        Some(PathBuf::from("/repo/src/drive"))
    );
}

#[test]
fn custom_component_map_keeps_first_entry() {
    let map = ComponentMap::new([("Net", "network"), ("net", "ignored"), ("Store", "storage")]);

    assert_eq!(map.len(), 2);
    assert_eq!(map.directory("net"), Some("network"));
    let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Net", "Store"]);
}

#[test]
fn durations_parse_with_units() {
    assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
    assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120));
    assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));

    for bad in ["", "10", "s", "5d"] {
        assert!(
            matches!(parse_duration(bad), Err(HarnessError::InvalidArgument(_))),
            "{bad:?} should be rejected"
        );
    }
}
