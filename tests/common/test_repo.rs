//! TestRepo builder for end-to-end testing
//!
//! Creates a temporary git repository, commits file versions into it and
//! runs the compiled `semdiff` binary against it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Config written for every repo: normalization off so tests never shell
/// out to a real formatter unless they opt in
const DEFAULT_CONFIG: &str = "[normalize]\nenabled = false\n";

/// Builder for creating test repository structures
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository with an isolated semdiff config
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        repo.write_config(DEFAULT_CONFIG);
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "test@test.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Get the path to the test repository root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the config file passed to the CLI
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".semdiff.toml")
    }

    /// Replace the semdiff config used by `run_cli`
    pub fn write_config(&self, content: &str) -> &Self {
        fs::write(self.config_path(), content).expect("Failed to write config");
        self
    }

    /// Add or overwrite a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Run git in the repository, panicking on failure
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit all files and return the new commit SHA
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Write `content` to `path` and commit it, returning the SHA
    pub fn commit_file(&self, path: &str, content: &str) -> String {
        self.add_file(path, content);
        self.commit(&format!("update {}", path))
    }

    /// Run the semdiff binary in the repository
    pub fn run_cli(&self, args: &[&str]) -> Output {
        self.run_cli_in(self.path(), args)
    }

    /// Run the semdiff binary from `cwd`
    pub fn run_cli_in(&self, cwd: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_semdiff"))
            .current_dir(cwd)
            .env("SEMDIFF_CONFIG", self.config_path())
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to run semdiff")
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args);
        assert!(
            output.status.success(),
            "semdiff {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return (exit code, stdout, stderr)
    pub fn run_cli_failure(&self, args: &[&str]) -> (Option<i32>, String, String) {
        let output = self.run_cli(args);
        assert!(
            !output.status.success(),
            "semdiff {:?} should have failed",
            args
        );
        (
            output.status.code(),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }
}
