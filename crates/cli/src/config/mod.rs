// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading.
//!
//! Precedence: command-line flags, then `covtree.toml`, then the built-in
//! defaults in [`defaults`].

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::mode::CoverMode;

/// Errors detected before traversal starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid test file pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("test command must name a program")]
    EmptyCommand,

    #[error("invalid working directory '{}': not a directory", path.display())]
    InvalidRoot { path: PathBuf },
}

/// Resolved configuration for one coverage run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Coverage mode passed to the test command and written in the header.
    #[serde(default)]
    pub covermode: CoverMode,

    /// Root-relative directories to prune (exact match).
    #[serde(default = "defaults::ignore")]
    pub ignore: Vec<String>,

    /// Ask long-running tests to shorten their run time.
    #[serde(default)]
    pub short: bool,

    /// Filename glob identifying test files.
    #[serde(default = "defaults::test_pattern")]
    pub test_pattern: String,

    /// Test command: program followed by leading arguments.
    #[serde(default = "defaults::command")]
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            covermode: CoverMode::default(),
            ignore: defaults::ignore(),
            short: false,
            test_pattern: defaults::test_pattern(),
            command: defaults::command(),
        }
    }
}

impl Config {
    /// Apply command-line overrides on top of file or default values.
    pub fn apply_overrides(&mut self, covermode: Option<CoverMode>, ignore: Option<&str>, short: bool) {
        if let Some(mode) = covermode {
            self.covermode = mode;
        }
        if let Some(list) = ignore {
            self.ignore = parse_ignore_list(list);
        }
        self.short |= short;
    }

    /// Reject values that would only fail once the walk is under way.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.command.first() {
            Some(program) if !program.is_empty() => {}
            _ => return Err(ConfigError::EmptyCommand),
        }
        globset::Glob::new(&self.test_pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: self.test_pattern.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Split a comma-separated ignore list. Empty entries are dropped.
pub fn parse_ignore_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load and validate configuration from a file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse and validate configuration from TOML text.
pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
