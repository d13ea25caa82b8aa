// src/pool/locate.rs

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{HarnessError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Suffixes tried, in order, after the bare name.
pub const DEFAULT_EXTENSIONS: &[&str] = &["", ".exe"];

/// Ordered list of directories to search for executables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a platform path-list value such as `$PATH`.
    pub fn parse(value: &OsStr) -> Self {
        Self {
            dirs: std::env::split_paths(value).collect(),
        }
    }

    /// The process's `PATH`, or an empty list if it is unset.
    pub fn from_env() -> Self {
        std::env::var_os("PATH")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Finds executables by name.
///
/// Directories are tried in search-path order, and within each directory the
/// extensions in order; the first candidate that is an existing file wins.
#[derive(Debug, Clone)]
pub struct Locator {
    search: SearchPath,
    extensions: Vec<String>,
    fs: Arc<dyn FileSystem>,
}

impl Locator {
    pub fn new(search: SearchPath) -> Self {
        Self {
            search,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            fs: Arc::new(RealFileSystem),
        }
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search
    }

    /// Resolve `name` to an absolute path, or fail with `NotFound`.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(HarnessError::invalid("executable name must not be empty"));
        }

        for dir in self.search.dirs() {
            for ext in &self.extensions {
                let mut file_name = OsString::from(name);
                file_name.push(ext);
                let candidate = dir.join(&file_name);

                if self.fs.is_file(&candidate) {
                    let resolved = self.fs.absolute(&candidate)?;
                    debug!(name, path = %resolved.display(), "resolved executable");
                    return Ok(resolved);
                }
            }
        }

        Err(HarnessError::NotFound(format!(
            "executable '{name}' not found in {} search director{}",
            self.search.dirs().len(),
            if self.search.dirs().len() == 1 { "y" } else { "ies" }
        )))
    }
}
