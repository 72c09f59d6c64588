// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage run orchestration.
//!
//! Builds the filter and executor from configuration, walks the tree, and
//! writes the merged profile only when the whole walk succeeded.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::error::Result;
use crate::executor::{GoTestExecutor, TestExecutor};
use crate::filter::{DirectoryFilter, IgnoreSet};
use crate::verbose::VerboseLogger;
use crate::walker::{CoverageWalker, WalkStats, WalkerConfig};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path of the merged profile.
    pub output: PathBuf,
    pub stats: WalkStats,
}

/// Run coverage for every package under `root` using `go test`.
pub fn run(root: &Path, config: &Config, verbose: VerboseLogger) -> Result<RunSummary> {
    config.validate()?;
    let executor = GoTestExecutor::new(&config.command, verbose)?;
    run_with(root, config, &executor, verbose)
}

/// Run coverage with a custom executor.
pub fn run_with<E: TestExecutor + ?Sized>(
    root: &Path,
    config: &Config,
    executor: &E,
    verbose: VerboseLogger,
) -> Result<RunSummary> {
    if !root.is_dir() {
        return Err(ConfigError::InvalidRoot {
            path: root.to_path_buf(),
        }
        .into());
    }
    let filter = DirectoryFilter::new(
        IgnoreSet::new(config.ignore.iter().cloned()),
        &config.test_pattern,
    )?;

    verbose.section("Coverage");
    verbose.working_dir(root);
    tracing::info!(root = %root.display(), mode = %config.covermode, "starting coverage run");

    let walker = CoverageWalker::new(
        &filter,
        executor,
        WalkerConfig {
            mode: config.covermode,
            short: config.short,
            verbose,
        },
    );
    let (merged, stats) = walker.walk(root)?;
    let output = merged.persist(root)?;

    Ok(RunSummary { output, stats })
}

#[cfg(test)]
#[path = "cover_tests.rs"]
mod tests;
