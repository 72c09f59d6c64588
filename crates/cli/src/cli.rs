// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

use crate::color::ColorMode;
use crate::mode::CoverMode;

const LONG_ABOUT: &str = "\
Runs coverage tests on a package and all its sub-packages. The coverage
profile is output as a single file called 'covtree.coverprofile' in the
current directory, for use by coverage reporting tools.";

/// Run coverage tests in every package of a tree and merge the profiles
#[derive(Parser)]
#[command(name = "covtree")]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Mode to run when testing files [default: count]
    #[arg(long, value_name = "MODE")]
    pub covermode: Option<CoverMode>,

    /// Comma separated list of directories to ignore, relative to the
    /// current directory [default: .git,vendor]
    #[arg(long, value_name = "dir1,dir2,...")]
    pub ignore: Option<String>,

    /// Tell long-running tests to shorten their run time
    #[arg(long)]
    pub short: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "COVTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
