// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! `Config` delegates to these functions via `#[serde(default = ...)]`.

/// Config file name searched for by discovery.
pub const CONFIG_FILENAME: &str = "covtree.toml";

/// Directories ignored when no ignore list is given: version-control
/// metadata and vendored dependencies.
pub const IGNORE: &str = ".git,vendor";

/// Default ignore list, split into entries.
pub fn ignore() -> Vec<String> {
    super::parse_ignore_list(IGNORE)
}

/// Filename glob identifying test files.
pub fn test_pattern() -> String {
    "*_test.go".to_string()
}

/// Test command: program followed by any leading arguments.
pub fn command() -> Vec<String> {
    vec!["go".to_string()]
}
