// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! covtree: recursive coverage aggregation for multi-package source trees.
//!
//! Walks a tree, runs the test command with coverage in every directory that
//! holds tests, and merges the per-package profiles into one file.

pub mod cli;
pub mod color;
pub mod config;
pub mod cover;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod filter;
pub mod merger;
pub mod mode;
pub mod verbose;
pub mod walker;


pub use error::{Error, Result};
pub use mode::CoverMode;
