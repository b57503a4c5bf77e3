//! Git integration: the source provider that reads a file at a revision
//!
//! Uses subprocess calls to git for maximum compatibility.

mod source;

pub use source::{GitSourceProvider, SourceProvider, WORKING};

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Failure of a single git invocation
#[derive(Error, Debug)]
pub enum GitCommandError {
    #[error("Failed to execute git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    Failed { args: String, stderr: String },

    #[error("git {args} produced output that is not valid UTF-8")]
    InvalidUtf8 { args: String },
}

/// Run a git command and return stdout exactly as produced
///
/// Output that is not valid UTF-8 is an error rather than being replaced.
pub fn git_command_raw(
    args: &[&str],
    cwd: Option<&Path>,
) -> std::result::Result<String, GitCommandError> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitCommandError::Failed {
            args: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| GitCommandError::InvalidUtf8 {
        args: args.join(" "),
    })
}

/// Run a git command and return trimmed stdout
pub fn git_command(
    args: &[&str],
    cwd: Option<&Path>,
) -> std::result::Result<String, GitCommandError> {
    git_command_raw(args, cwd).map(|out| out.trim().to_string())
}

/// Get repo root directory
pub fn get_repo_root(cwd: Option<&Path>) -> std::result::Result<String, GitCommandError> {
    git_command(&["rev-parse", "--show-toplevel"], cwd)
}
