// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Depth-first coverage walk.
//!
//! Visits every directory under the root in pre-order, siblings sorted by
//! file name. Ignored directories are pruned before their children are
//! listed; directories without tests are passed over but descended into;
//! every other directory has its tests run and its profile merged. The
//! first failure aborts the walk.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ignore::WalkBuilder;

use crate::error::{Error, Result};
use crate::executor::{ExecRequest, ExecutionOutcome, TestExecutor};
use crate::filter::{DirClass, DirectoryFilter, ROOT_REL, relative_path};
use crate::merger::MergedProfile;
use crate::mode::CoverMode;
use crate::verbose::VerboseLogger;

/// Settings for one coverage walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkerConfig {
    /// Coverage mode for every package.
    pub mode: CoverMode,
    /// Pass `-short` to the test command.
    pub short: bool,
    /// Progress output.
    pub verbose: VerboseLogger,
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories classified (pruned subtrees excluded).
    pub dirs_visited: usize,
    /// Directories pruned by the ignore set.
    pub dirs_ignored: usize,
    /// Directories without test files.
    pub dirs_skipped: usize,
    /// Directories whose tests ran and were merged.
    pub packages_tested: usize,
}

/// Walks a tree and merges the coverage of every package with tests.
pub struct CoverageWalker<'a, E: TestExecutor + ?Sized> {
    filter: &'a DirectoryFilter,
    executor: &'a E,
    config: WalkerConfig,
}

impl<'a, E: TestExecutor + ?Sized> CoverageWalker<'a, E> {
    pub fn new(filter: &'a DirectoryFilter, executor: &'a E, config: WalkerConfig) -> Self {
        Self {
            filter,
            executor,
            config,
        }
    }

    /// Walk `root`, returning the merged profile and walk statistics.
    ///
    /// Nothing is written to disk; persisting the profile is up to the
    /// caller once the walk has completed.
    pub fn walk(&self, root: &Path) -> Result<(MergedProfile, WalkStats)> {
        let verbose = self.config.verbose;
        let mut merged = MergedProfile::new(self.config.mode);
        let mut stats = WalkStats::default();

        // Pruning below only applies to descendants of the root.
        if self.filter.is_ignored(ROOT_REL) {
            verbose.ignoring(ROOT_REL);
            stats.dirs_ignored = 1;
            return Ok((merged, stats));
        }

        let pruned = Arc::new(AtomicUsize::new(0));
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        {
            let ignores = self.filter.ignores().clone();
            let root = root.to_path_buf();
            let pruned = Arc::clone(&pruned);
            builder.filter_entry(move |entry| {
                if !entry.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                // Relative paths are recomputed from the root for every entry.
                match relative_path(&root, entry.path()) {
                    Some(rel) if ignores.contains(&rel) => {
                        verbose.ignoring(&rel);
                        pruned.fetch_add(1, Ordering::Relaxed);
                        false
                    }
                    _ => true,
                }
            });
        }

        for result in builder.build() {
            let entry = result.map_err(|source| traversal_error(root, source))?;
            if !entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let dir = entry.path();
            let rel = relative_path(root, dir).ok_or_else(|| {
                traversal_error(
                    root,
                    ignore::Error::Io(std::io::Error::other(format!(
                        "cannot compute path of '{}' relative to root",
                        dir.display()
                    ))),
                )
            })?;
            let class = self.filter.classify(dir, &rel).map_err(|err| {
                traversal_error(
                    root,
                    ignore::Error::WithPath {
                        path: dir.to_path_buf(),
                        err: Box::new(ignore::Error::Io(err)),
                    },
                )
            })?;
            stats.dirs_visited += 1;

            match class {
                DirClass::Ignored => stats.dirs_ignored += 1,
                DirClass::NoTests => {
                    verbose.no_tests(&rel);
                    stats.dirs_skipped += 1;
                }
                DirClass::Eligible => {
                    self.process(dir, &rel, &mut merged)?;
                    stats.packages_tested += 1;
                }
            }
        }

        stats.dirs_ignored += pruned.load(Ordering::Relaxed);
        tracing::info!(
            packages = stats.packages_tested,
            skipped = stats.dirs_skipped,
            ignored = stats.dirs_ignored,
            "walk complete"
        );
        Ok((merged, stats))
    }

    /// Run one package's tests and merge the result.
    fn process(&self, dir: &Path, rel: &str, merged: &mut MergedProfile) -> Result<()> {
        self.config.verbose.processing(rel);
        let request = ExecRequest {
            dir,
            mode: self.config.mode,
            short: self.config.short,
        };
        match self.executor.execute(&request) {
            ExecutionOutcome::Success(fragment) => {
                tracing::debug!(dir = rel, bytes = fragment.as_str().len(), "merged profile");
                merged.append(&fragment);
                Ok(())
            }
            ExecutionOutcome::TestFailure { status, output } => {
                tracing::debug!(dir = rel, %status, "tests failed");
                Err(Error::TestFailure {
                    dir: rel.to_string(),
                    status: status.to_string(),
                    output,
                })
            }
            ExecutionOutcome::TransientError(source) => Err(Error::Execution {
                dir: rel.to_string(),
                source,
            }),
        }
    }
}

fn traversal_error(root: &Path, source: ignore::Error) -> Error {
    Error::Traversal {
        root: root.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
