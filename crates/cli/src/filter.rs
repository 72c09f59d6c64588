// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory classification.
//!
//! Decides whether a directory is pruned, passed over for lack of tests, or
//! handed to the executor. Ignore entries match root-relative paths exactly;
//! `build/output` prunes only that nested directory, not every `output`.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path};

use globset::{Glob, GlobMatcher};

use crate::config::ConfigError;

/// Relative path of the traversal root itself.
pub const ROOT_REL: &str = ".";

/// Set of root-relative directory paths to prune.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    entries: HashSet<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.entries.contains(rel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classification of one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirClass {
    /// Listed in the ignore set; the subtree is pruned.
    Ignored,
    /// No test files; children are still visited.
    NoTests,
    /// Has test files; run the tests here.
    Eligible,
}

/// Classifies directories by ignore set and test-file presence.
#[derive(Debug, Clone)]
pub struct DirectoryFilter {
    ignores: IgnoreSet,
    test_files: GlobMatcher,
}

impl DirectoryFilter {
    pub fn new(ignores: IgnoreSet, test_pattern: &str) -> Result<Self, ConfigError> {
        let glob = Glob::new(test_pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: test_pattern.to_string(),
            source,
        })?;
        Ok(Self {
            ignores,
            test_files: glob.compile_matcher(),
        })
    }

    pub fn ignores(&self) -> &IgnoreSet {
        &self.ignores
    }

    pub fn is_ignored(&self, rel: &str) -> bool {
        self.ignores.contains(rel)
    }

    /// Classify the directory at `dir`, whose root-relative path is `rel`.
    pub fn classify(&self, dir: &Path, rel: &str) -> io::Result<DirClass> {
        if self.is_ignored(rel) {
            return Ok(DirClass::Ignored);
        }
        if self.has_test_files(dir)? {
            Ok(DirClass::Eligible)
        } else {
            Ok(DirClass::NoTests)
        }
    }

    /// Check whether `dir` directly contains a file matching the test pattern.
    pub fn has_test_files(&self, dir: &Path) -> io::Result<bool> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            if self.test_files.is_match(Path::new(&entry.file_name())) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Path of `path` relative to `root`, `/`-separated, with `.` for the root.
///
/// Returns `None` when `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        Some(ROOT_REL.to_string())
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
