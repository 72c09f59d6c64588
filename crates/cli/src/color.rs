// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling for the run summary.

use std::io::{self, IsTerminal, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// `--color` flag values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Resolve the color choice for one output stream.
///
/// `no_color` (the `--no-color` flag or a set `NO_COLOR` variable) always
/// wins; `auto` colors only terminals.
pub fn resolve_color(mode: ColorMode, no_color: bool, is_terminal: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if is_terminal => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Stdout stream honoring the color flags.
pub fn stdout(mode: ColorMode, no_color: bool) -> StandardStream {
    let choice = resolve_color(mode, no_color || no_color_env(), io::stdout().is_terminal());
    StandardStream::stdout(choice)
}

/// Stderr stream honoring the color flags.
pub fn stderr(mode: ColorMode, no_color: bool) -> StandardStream {
    let choice = resolve_color(mode, no_color || no_color_env(), io::stderr().is_terminal());
    StandardStream::stderr(choice)
}

/// Color scheme for summary output.
pub mod scheme {
    use super::*;

    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }
}

/// Write `label` in `spec`, then `rest` uncolored, then a newline.
pub fn write_labeled(out: &mut impl WriteColor, spec: &ColorSpec, label: &str, rest: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{label}")?;
    out.reset()?;
    writeln!(out, "{rest}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
