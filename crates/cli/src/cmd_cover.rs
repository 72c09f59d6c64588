// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage command implementation.

use std::process::ExitCode;

use anyhow::Context;

use covtree::cli::Cli;
use covtree::color::{self, scheme};
use covtree::config::{self, Config};
use covtree::cover;
use covtree::discovery;
use covtree::verbose::VerboseLogger;

/// Resolve configuration, run coverage in the current directory, and print
/// a one-line summary.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let verbose = VerboseLogger::new(cli.verbose);

    // Find and load config
    let config_path = match &cli.config {
        Some(path) => Some(cwd.join(path)),
        None => discovery::find_config(&cwd),
    };
    let mut config = match &config_path {
        Some(path) => {
            verbose.log(&format!("Config: {}", path.display()));
            config::load(path)?
        }
        None => Config::default(),
    };
    config.apply_overrides(cli.covermode, cli.ignore.as_deref(), cli.short);

    let summary = cover::run(&cwd, &config, verbose)?;

    let file_name = summary
        .output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stats = summary.stats;
    let mut stdout = color::stdout(cli.color, cli.no_color);
    color::write_labeled(
        &mut stdout,
        &scheme::pass(),
        "PASS:",
        &format!(
            " wrote {} ({} packages, {} skipped, {} ignored)",
            file_name, stats.packages_tested, stats.dirs_skipped, stats.dirs_ignored
        ),
    )?;

    Ok(ExitCode::SUCCESS)
}
