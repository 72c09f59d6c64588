// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for the recursive coverage run.
//!
//! The test command is a `sh` script, so these specs only run on Unix.

#![cfg(unix)]

use crate::prelude::*;

// =============================================================================
// MERGING
// =============================================================================

/// > Sibling packages are each tested once and merged in visitation order
#[test]
fn merges_sibling_packages_in_order() {
    let temp = Project::empty();
    temp.config("ignore = []\n");
    temp.file("b/b_test.go", "package b");
    temp.file("a/a_test.go", "package a");

    temp.covtree()
        .arg("--covermode=count")
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS: wrote covtree.coverprofile (2 packages"));

    assert_eq!(temp.invocations(), vec!["a", "b"]);
    assert_eq!(
        temp.output(),
        "mode: count\na/a.go:3.2,5.16 1 0\nb/b.go:3.2,5.16 1 0\n"
    );
}

/// > The merged output has exactly one header, for the configured mode
#[test]
fn single_header_for_configured_mode() {
    let temp = Project::empty();
    temp.config("");
    temp.file("a/a_test.go", "");
    temp.file("a/b/b_test.go", "");
    temp.file("c/c_test.go", "");

    temp.covtree().arg("--covermode=atomic").assert().success();

    let output = temp.output();
    let headers: Vec<_> = output.lines().filter(|l| l.starts_with("mode:")).collect();
    assert_eq!(headers, vec!["mode: atomic"]);
    assert_eq!(output.lines().count(), 4);
}

/// > A tree with no test files produces a header-only profile
#[test]
fn no_tests_writes_header_only() {
    let temp = Project::empty();
    temp.config("");
    temp.file("nodoc/nodoc.go", "package nodoc");

    temp.covtree().assert().success();

    assert_eq!(temp.output(), "mode: count\n");
    assert!(temp.invocations().is_empty());
}

/// > --short is passed through to the test command
#[test]
fn short_flag_reaches_test_command() {
    let temp = Project::empty();
    temp.config("");
    temp.file("a/a_test.go", "");

    temp.covtree().arg("--short").assert().success();

    assert_eq!(temp.output(), "mode: count\na/a.go:3.2,5.16 1 1\n");
}

/// > Rerunning on an unchanged tree gives byte-identical output
#[test]
fn rerun_is_byte_identical() {
    let temp = Project::empty();
    temp.config("");
    temp.file("a/a_test.go", "");
    temp.file("b/c/c_test.go", "");

    temp.covtree().assert().success();
    let first = temp.output();
    temp.covtree().assert().success();

    assert_eq!(temp.output(), first);
}

// =============================================================================
// IGNORE AND SKIP POLICY
// =============================================================================

/// > Ignored directories and everything beneath them are never tested
#[test]
fn ignored_vendor_is_pruned() {
    let temp = Project::empty();
    temp.config("");
    temp.file("vendor/dep/dep_test.go", "");
    temp.file("vendor/v_test.go", "");
    temp.file("pkg/pkg_test.go", "");

    temp.covtree().assert().success();

    assert_eq!(temp.invocations(), vec!["pkg"]);
    assert!(!temp.output().contains("vendor"));
    assert!(!temp.output().contains("dep"));
}

/// > Ignore entries match the exact root-relative path
#[test]
fn ignore_flag_matches_exact_paths() {
    let temp = Project::empty();
    temp.config("");
    temp.file("build/output/o_test.go", "");
    temp.file("tools/output/t_test.go", "");

    temp.covtree().arg("--ignore=.git,build/output").assert().success();

    assert_eq!(temp.invocations(), vec!["tools/output"]);
}

/// > Directories without tests are still descended into
#[test]
fn dirs_without_tests_are_descended() {
    let temp = Project::empty();
    temp.config("");
    temp.file("nodoc/nodoc.go", "package nodoc");
    temp.file("nodoc/inner/inner_test.go", "");

    temp.covtree()
        .arg("-v")
        .assert()
        .success()
        .stderr(predicates::str::contains("No test files in dir: nodoc, skipping"))
        .stderr(predicates::str::contains("Processing dir: nodoc/inner"));

    assert_eq!(temp.invocations(), vec!["nodoc/inner"]);
}

/// > Verbose mode shows the working dir and command line
#[test]
fn verbose_shows_command_line() {
    let temp = Project::empty();
    temp.config("");
    temp.file("a/a_test.go", "");

    temp.covtree()
        .arg("--verbose")
        .arg("--short")
        .assert()
        .success()
        .stderr(predicates::str::contains("Working dir: "))
        .stderr(predicates::str::contains(
            "test -short -covermode=count -coverprofile=profile.coverprofile -outputdir=",
        ))
        .stderr(predicates::str::contains("Ignoring dir: .git"));
}

// =============================================================================
// FAILURES
// =============================================================================

/// > A failing package aborts the run and leaves the old profile in place
#[test]
fn failing_tests_abort_and_keep_previous_output() {
    let temp = Project::empty();
    temp.config("");
    temp.file("a/a_test.go", "");
    temp.file("b/b_test.go", "");
    temp.file("b/FAIL_TESTS", "");
    temp.file("c/c_test.go", "");
    temp.file(OUT_FILENAME, "mode: count\nold.go:1.1,2.2 1 1\n");

    temp.covtree()
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("FAIL: tests failed in 'b'"))
        .stderr(predicates::str::contains("--- FAIL: Testb"));

    assert_eq!(temp.invocations(), vec!["a", "b"]);
    assert_eq!(temp.output(), "mode: count\nold.go:1.1,2.2 1 1\n");
}

/// > A missing test command is an environment error
#[test]
fn missing_test_command_fails() {
    let temp = Project::empty();
    temp.file("covtree.toml", "command = [\"covtree-no-such-go\"]\n");
    temp.file("a/a_test.go", "");

    temp.covtree()
        .assert()
        .failure()
        .stderr(predicates::str::contains("could not collect coverage in 'a'"))
        .stderr(predicates::str::contains("covtree-no-such-go"));

    assert!(!temp.path().join(OUT_FILENAME).exists());
}
