// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage instrumentation modes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Coverage mode recorded in the profile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CoverMode {
    /// Did each statement run?
    Set,
    /// How many times did each statement run?
    #[default]
    Count,
    /// Like count, but safe in multithreaded tests.
    Atomic,
}

impl CoverMode {
    pub const ALL: [CoverMode; 3] = [CoverMode::Set, CoverMode::Count, CoverMode::Atomic];

    pub fn as_str(self) -> &'static str {
        match self {
            CoverMode::Set => "set",
            CoverMode::Count => "count",
            CoverMode::Atomic => "atomic",
        }
    }

    /// Canonical header line, including the trailing newline.
    pub fn header(self) -> String {
        format!("mode: {}\n", self.as_str())
    }
}

impl fmt::Display for CoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown coverage mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid covermode '{0}' (expected one of: set, count, atomic)")]
pub struct ParseCoverModeError(pub String);

impl FromStr for CoverMode {
    type Err = ParseCoverModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseCoverModeError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
