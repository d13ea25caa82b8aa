// src/components.rs

//! Mapping between project component names and their source directories.

use std::path::{Path, PathBuf};

const DEFAULT_COMPONENTS: &[(&str, &str)] = &[
    ("Common", "common"),
    ("Rudp", "rudp"),
    ("Routing", "routing"),
    ("Private", "private"),
    ("Pd", "pd"),
    ("Encrypt", "encrypt"),
    ("Drive", "drive"),
    ("Lifestuff", "lifestuff"),
];

/// Immutable, ordered component table.
///
/// Built once and handed to whatever needs it; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMap {
    entries: Vec<(String, String)>,
}

impl Default for ComponentMap {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENTS.iter().copied())
    }
}

impl ComponentMap {
    /// Build from `(display name, directory)` pairs. Later duplicates of a
    /// display name are ignored.
    pub fn new<I, N, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut out: Vec<(String, String)> = Vec::new();
        for (name, dir) in entries {
            let name = name.into();
            if out.iter().any(|(n, _)| n.eq_ignore_ascii_case(&name)) {
                continue;
            }
            out.push((name, dir.into()));
        }
        Self { entries: out }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory for a component, looked up by display name (any case) or by
    /// the directory name itself.
    pub fn directory(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, d)| n.eq_ignore_ascii_case(name) || d == name)
            .map(|(_, d)| d.as_str())
    }

    /// `<root>/src/<dir>` for the named component.
    pub fn source_dir(&self, root: &Path, name: &str) -> Option<PathBuf> {
        self.directory(name).map(|dir| root.join("src").join(dir))
    }
}
