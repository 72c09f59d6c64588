// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-package test execution.
//!
//! Runs the test command with coverage enabled in one directory and returns
//! the profile it wrote, or a classified failure. The target directory is
//! passed to each subprocess as its working directory; the process-wide
//! current directory is never changed.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

use crate::config::ConfigError;
use crate::merger::CoverageFragment;
use crate::mode::CoverMode;
use crate::verbose::VerboseLogger;

/// Profile filename the test command is told to write in the scratch dir.
pub const PROFILE_FILENAME: &str = "profile.coverprofile";

/// Environment failures while running a package's tests.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("could not create scratch directory")]
    ScratchCreate(#[source] io::Error),

    #[error("could not remove scratch directory '{}'", path.display())]
    ScratchRemove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("could not read coverage profile '{}'", path.display())]
    ReadProfile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of running one directory's tests.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// Tests passed; holds the profile text.
    Success(CoverageFragment),
    /// Tests ran and exited unsuccessfully.
    TestFailure {
        status: ExitStatus,
        /// Combined stdout and stderr.
        output: String,
    },
    /// The environment broke before a verdict was reached.
    TransientError(ExecError),
}

/// What to run for one eligible directory.
#[derive(Debug, Clone, Copy)]
pub struct ExecRequest<'a> {
    pub dir: &'a Path,
    pub mode: CoverMode,
    pub short: bool,
}

/// Runs coverage tests for a single directory.
pub trait TestExecutor {
    fn execute(&self, request: &ExecRequest<'_>) -> ExecutionOutcome;
}

/// Executor invoking `go test` (or a configured stand-in).
#[derive(Debug, Clone)]
pub struct GoTestExecutor {
    program: String,
    leading_args: Vec<String>,
    scratch_root: Option<PathBuf>,
    verbose: VerboseLogger,
}

impl GoTestExecutor {
    /// Create an executor from `command`: a program plus leading arguments.
    pub fn new(command: &[String], verbose: VerboseLogger) -> Result<Self, ConfigError> {
        match command.split_first() {
            Some((program, rest)) if !program.is_empty() => Ok(Self {
                program: program.clone(),
                leading_args: rest.to_vec(),
                scratch_root: None,
                verbose,
            }),
            _ => Err(ConfigError::EmptyCommand),
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Full argument list passed to the program.
    pub fn args(&self, mode: CoverMode, short: bool, output_dir: &Path) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push("test".to_string());
        if short {
            args.push("-short".to_string());
        }
        args.push(format!("-covermode={mode}"));
        args.push(format!("-coverprofile={PROFILE_FILENAME}"));
        args.push(format!("-outputdir={}", output_dir.display()));
        args
    }

    /// Command line as shown in verbose output.
    pub fn command_line(&self, mode: CoverMode, short: bool, output_dir: &Path) -> String {
        let mut line = self.program.clone();
        for arg in self.args(mode, short, output_dir) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }

    fn run_in(&self, request: &ExecRequest<'_>, scratch: &Path) -> ExecutionOutcome {
        self.verbose
            .command(&self.command_line(request.mode, request.short, scratch));

        let output = Command::new(&self.program)
            .args(self.args(request.mode, request.short, scratch))
            .current_dir(request.dir)
            .stdin(Stdio::null())
            .output();
        let output = match output {
            Ok(output) => output,
            Err(source) => {
                return ExecutionOutcome::TransientError(ExecError::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
        };

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            return ExecutionOutcome::TestFailure {
                status: output.status,
                output: text,
            };
        }

        let profile = scratch.join(PROFILE_FILENAME);
        match std::fs::read_to_string(&profile) {
            Ok(text) => ExecutionOutcome::Success(CoverageFragment::new(text)),
            Err(source) => ExecutionOutcome::TransientError(ExecError::ReadProfile {
                path: profile,
                source,
            }),
        }
    }
}

impl TestExecutor for GoTestExecutor {
    fn execute(&self, request: &ExecRequest<'_>) -> ExecutionOutcome {
        let mut builder = tempfile::Builder::new();
        builder.prefix("covtree");
        let scratch = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        let scratch = match scratch {
            Ok(dir) => dir,
            Err(source) => return ExecutionOutcome::TransientError(ExecError::ScratchCreate(source)),
        };
        let scratch_path = scratch.path().to_path_buf();
        tracing::debug!(dir = %request.dir.display(), scratch = %scratch_path.display(), "running tests");

        let outcome = self.run_in(request, &scratch_path);

        match scratch.close() {
            Ok(()) => outcome,
            Err(source) => match outcome {
                ExecutionOutcome::Success(_) => {
                    ExecutionOutcome::TransientError(ExecError::ScratchRemove {
                        path: scratch_path,
                        source,
                    })
                }
                // The earlier failure is the one worth reporting.
                failed => {
                    tracing::warn!(path = %scratch_path.display(), "could not remove scratch directory: {}", source);
                    failed
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
