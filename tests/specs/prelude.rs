//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing covtree CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Name of the merged profile written by covtree.
pub const OUT_FILENAME: &str = "covtree.coverprofile";

/// Returns a Command configured to run the covtree binary with color and
/// logging settings isolated from the caller's environment.
pub fn covtree_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("covtree"));
    cmd.env_remove("COVTREE_CONFIG").env_remove("COVTREE_LOG");
    cmd
}

/// A source tree under test plus a `sh` stand-in for `go test` kept
/// outside the tree.
pub struct Project {
    tree: TempDir,
    tools: TempDir,
}

impl Project {
    /// Empty tree with a `.git` marker so config discovery stops here.
    pub fn empty() -> Self {
        let project = Self {
            tree: TempDir::new().unwrap(),
            tools: TempDir::new().unwrap(),
        };
        fs::create_dir(project.tree.path().join(".git")).unwrap();
        fs::write(project.fake_go(), FAKE_GO).unwrap();
        project
    }

    pub fn path(&self) -> &Path {
        self.tree.path()
    }

    /// Write a file relative to the tree root, creating parent directories.
    pub fn file(&self, path: &str, content: &str) {
        let full = self.tree.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    /// Write covtree.toml pointing the test command at the fake script,
    /// followed by `extra` lines.
    pub fn config(&self, extra: &str) {
        let content = format!(
            "command = [\"sh\", \"{}\"]\n{}",
            self.fake_go().display(),
            extra
        );
        self.file("covtree.toml", &content);
    }

    /// Read the merged profile.
    pub fn output(&self) -> String {
        fs::read_to_string(self.tree.path().join(OUT_FILENAME)).unwrap()
    }

    /// Directory basenames the fake test command ran in, in order.
    pub fn invocations(&self) -> Vec<String> {
        match fs::read_to_string(self.log()) {
            Ok(content) => content
                .lines()
                .map(|line| {
                    let path = PathBuf::from(line);
                    relative_to(&fs::canonicalize(self.path()).unwrap(), &path)
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn fake_go(&self) -> PathBuf {
        self.tools.path().join("fake-go.sh")
    }

    fn log(&self) -> PathBuf {
        self.tools.path().join("invocations.log")
    }

    /// Run covtree in the tree root.
    pub fn covtree(&self) -> Command {
        let mut cmd = covtree_cmd();
        cmd.current_dir(self.path())
            .env("FAKE_GO_LOG", self.log())
            .arg("--no-color");
        cmd
    }
}

fn relative_to(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
        Err(_) => path.display().to_string(),
    }
}

/// Stand-in for `go test`. Logs its physical working directory to
/// `$FAKE_GO_LOG`, fails when a `FAIL_TESTS` file is present, and otherwise
/// writes a one-line profile named after the package directory whose hit
/// count records whether `-short` was passed.
const FAKE_GO: &str = r#"outdir=""
mode=""
short=0
for arg in "$@"; do
  case "$arg" in
    -outputdir=*) outdir="${arg#-outputdir=}" ;;
    -covermode=*) mode="${arg#-covermode=}" ;;
    -short) short=1 ;;
  esac
done
pwd -P >> "$FAKE_GO_LOG"
pkg=$(basename "$(pwd -P)")
if [ -f FAIL_TESTS ]; then
  echo "--- FAIL: Test$pkg"
  exit 1
fi
printf 'mode: %s\n%s/%s.go:3.2,5.16 1 %s\n' "$mode" "$pkg" "$pkg" "$short" > "$outdir/profile.coverprofile"
"#;
