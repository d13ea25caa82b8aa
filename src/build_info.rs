// src/build_info.rs

//! Helpers for inspecting a CMake build directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::errors::{HarnessError, Result};
use crate::fs::FileSystem;

const CMAKE_CACHE: &str = "CMakeCache.txt";
const BUILD_TYPE_KEY: &str = "CMAKE_BUILD_TYPE:STRING=";

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts full names (any case) and the short codes `d`, `r`, `rwdi`, `msr`.
impl FromStr for BuildType {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "d" | "debug" => Ok(BuildType::Debug),
            "r" | "release" => Ok(BuildType::Release),
            "rwdi" | "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "msr" | "minsizerel" => Ok(BuildType::MinSizeRel),
            other => Err(HarnessError::invalid(format!(
                "invalid build type '{other}' (expected Debug, Release, RelWithDebInfo or MinSizeRel)"
            ))),
        }
    }
}

/// Path of a program built into `dir`, with `.exe` appended on Windows.
pub fn program_path(dir: &Path, prog: &str) -> PathBuf {
    if cfg!(windows) {
        dir.join(format!("{prog}.exe"))
    } else {
        dir.join(prog)
    }
}

/// Read the build type recorded in `<dir>/CMakeCache.txt`.
///
/// Returns `Ok(None)` when the cache exists but records no recognised build
/// type; a missing cache is an IO error.
pub fn detect_build_type(fs: &dyn FileSystem, dir: &Path) -> Result<Option<BuildType>> {
    let cache = dir.join(CMAKE_CACHE);
    let contents = fs.read_to_string(&cache)?;

    let found = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix(BUILD_TYPE_KEY))
        .find_map(|value| value.parse::<BuildType>().ok());

    debug!(cache = %cache.display(), build_type = ?found, "read CMake cache");
    Ok(found)
}
