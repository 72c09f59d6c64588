// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage profile merging.
//!
//! Every fragment carries its own `mode: <name>` header. The merged profile
//! strips all of them and prepends a single canonical header for the
//! configured mode when finalized.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::mode::CoverMode;

/// Name of the merged profile written into the traversal root.
pub const OUT_FILENAME: &str = "covtree.coverprofile";

/// Raw profile text produced by one package's test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageFragment(String);

impl CoverageFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Accumulates fragment bodies in visitation order.
#[derive(Debug, Clone)]
pub struct MergedProfile {
    mode: CoverMode,
    body: String,
    fragments: usize,
}

impl MergedProfile {
    pub fn new(mode: CoverMode) -> Self {
        Self {
            mode,
            body: String::new(),
            fragments: 0,
        }
    }

    pub fn mode(&self) -> CoverMode {
        self.mode
    }

    /// Number of fragments merged so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Merged body without the canonical header.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append one fragment with its header lines removed.
    pub fn append(&mut self, fragment: &CoverageFragment) {
        let start = self.body.len();
        push_without_headers(&mut self.body, fragment.as_str());
        // Keep the last line of this fragment from fusing with the next one.
        if self.body.len() > start && !self.body.ends_with('\n') {
            self.body.push('\n');
        }
        self.fragments += 1;
    }

    /// Final profile text: canonical header followed by the merged body.
    pub fn finalize(&self) -> String {
        let header = self.mode.header();
        let mut out = String::with_capacity(header.len() + self.body.len());
        out.push_str(&header);
        out.push_str(&self.body);
        out
    }

    /// Write the finalized profile to [`OUT_FILENAME`] inside `dir`.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the target, so a failed write never leaves a
    /// half-written profile behind.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf> {
        let target = dir.join(OUT_FILENAME);
        let output_err = |source: std::io::Error| Error::Output {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
        tmp.write_all(self.finalize().as_bytes()).map_err(output_err)?;
        tmp.as_file().sync_all().map_err(output_err)?;
        set_standard_permissions(tmp.path()).map_err(output_err)?;
        tmp.persist(&target).map_err(|e| output_err(e.error))?;

        tracing::debug!(path = %target.display(), fragments = self.fragments, "wrote merged profile");
        Ok(target)
    }
}

#[cfg(unix)]
fn set_standard_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_standard_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Remove every `mode: <lowercase letters>` header line from `text`.
///
/// A header is only recognized when it is a complete line terminated by
/// `\n`; the match is exact, so surrounding whitespace or uppercase letters
/// leave the line untouched.
pub fn strip_mode_headers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_without_headers(&mut out, text);
    out
}

fn push_without_headers(out: &mut String, text: &str) {
    for line in text.split_inclusive('\n') {
        let is_header = line
            .strip_suffix('\n')
            .is_some_and(is_mode_header);
        if !is_header {
            out.push_str(line);
        }
    }
}

/// Check whether `line` (without its newline) is a mode header.
pub fn is_mode_header(line: &str) -> bool {
    match line.strip_prefix("mode: ") {
        Some(name) => !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase()),
        None => false,
    }
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
