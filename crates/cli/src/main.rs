// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use covtree::cli::Cli;
use covtree::color::{self, scheme};

mod cmd_cover;

fn init_logging() {
    let filter = EnvFilter::try_from_env("COVTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match cmd_cover::run(&cli) {
        Ok(code) => code,
        Err(err) => {
            let mut stderr = color::stderr(cli.color, cli.no_color);
            // Nothing sensible left to do if stderr itself is gone.
            let _ = color::write_labeled(&mut stderr, &scheme::fail(), "FAIL:", &format!(" {err:#}"));
            ExitCode::FAILURE
        }
    }
}
