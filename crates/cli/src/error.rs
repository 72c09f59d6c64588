// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for a coverage run.
//!
//! Every variant aborts the run. Nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::executor::ExecError;

/// Result type for coverage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a coverage run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, detected before traversal starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The directory walk itself failed.
    #[error("could not walk working directory '{}'", root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// The test command ran and exited unsuccessfully.
    #[error("tests failed in '{dir}' ({status})\noutput:\n{output}")]
    TestFailure {
        /// Directory relative to the traversal root.
        dir: String,
        /// Exit status description.
        status: String,
        /// Combined stdout and stderr of the test command.
        output: String,
    },

    /// The environment prevented running the tests or collecting the profile.
    #[error("could not collect coverage in '{dir}'")]
    Execution {
        dir: String,
        #[source]
        source: ExecError,
    },

    /// The merged profile could not be written.
    #[error("error writing to '{}'", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Check if this error came from a failing test suite.
    pub fn is_test_failure(&self) -> bool {
        matches!(self, Error::TestFailure { .. })
    }
}
