// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose progress output.
//!
//! Enabled with `--verbose`. Lines go to stderr so stdout stays reserved for
//! the run summary. The wording is informational, not a stable format.

use std::path::Path;

/// Progress reporter for a coverage run. Silent unless enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr (indented as content under a section).
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("  {}", msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("\n{}:", title);
        }
    }

    pub fn working_dir(&self, root: &Path) {
        self.log(&format!("Working dir: {}", root.display()));
    }

    pub fn ignoring(&self, rel: &str) {
        self.log(&format!("Ignoring dir: {rel}"));
    }

    pub fn no_tests(&self, rel: &str) {
        self.log(&format!("No test files in dir: {rel}, skipping"));
    }

    pub fn processing(&self, rel: &str) {
        self.log(&format!("Processing dir: {rel}"));
    }

    pub fn command(&self, line: &str) {
        self.log(&format!("Processing: {line}"));
    }
}
