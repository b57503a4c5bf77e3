//! File retrieval at a revision

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{get_repo_root, git_command_raw};
use crate::error::{Result, SemdiffError};

/// Pseudo-revision naming the working tree instead of a commit
pub const WORKING: &str = "WORKING";

/// Supplies the content of a file at a revision
///
/// A failure is fatal for the whole comparison: there is no useful result
/// with only one side available.
pub trait SourceProvider {
    fn fetch(&self, revision: &str, path: &Path) -> Result<String>;
}

/// Reads files via `git show <rev>:<path>`, or from disk for [`WORKING`]
#[derive(Debug, Clone, Default)]
pub struct GitSourceProvider {
    /// Directory git runs in; the process cwd when `None`
    repo_dir: Option<PathBuf>,
}

impl GitSourceProvider {
    pub fn new(repo_dir: Option<PathBuf>) -> Self {
        Self { repo_dir }
    }

    fn retrieval_error(revision: &str, path: &Path, message: impl Into<String>) -> SemdiffError {
        SemdiffError::Retrieval {
            revision: revision.to_string(),
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    fn read_working(&self, path: &Path) -> Result<String> {
        let full_path = match &self.repo_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        };
        fs::read_to_string(&full_path)
            .map_err(|e| Self::retrieval_error(WORKING, path, e.to_string()))
    }

    /// `<rev>:<path>` object name for `git show`
    ///
    /// Relative paths are anchored at the git working directory with `./` so
    /// they resolve the same way a shell would; absolute paths are made
    /// relative to the repository root.
    fn object_name(&self, revision: &str, path: &Path) -> Result<String> {
        let cwd = self.repo_dir.as_deref();
        let rel = if path.is_absolute() {
            let root = get_repo_root(cwd)
                .map_err(|e| Self::retrieval_error(revision, path, e.to_string()))?;
            let inside = path
                .strip_prefix(&root)
                .ok()
                .map(Path::to_path_buf)
                .or_else(|| {
                    let canonical = path.canonicalize().ok()?;
                    canonical.strip_prefix(&root).ok().map(Path::to_path_buf)
                })
                .ok_or_else(|| {
                    Self::retrieval_error(revision, path, "path is outside the repository")
                })?;
            git_path(&inside)
        } else {
            format!("./{}", git_path(path))
        };

        Ok(format!("{}:{}", revision, rel))
    }
}

impl SourceProvider for GitSourceProvider {
    fn fetch(&self, revision: &str, path: &Path) -> Result<String> {
        if revision == WORKING {
            tracing::debug!("reading {} from working tree", path.display());
            return self.read_working(path);
        }

        let object = self.object_name(revision, path)?;
        tracing::debug!("git show {}", object);
        git_command_raw(&["show", &object], self.repo_dir.as_deref())
            .map_err(|e| Self::retrieval_error(revision, path, e.to_string()))
    }
}

/// Forward-slash form of a path, as git expects in object names
fn git_path(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
