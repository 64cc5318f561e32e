//! Git CLI wrapper bound to an explicit repository root.
//!
//! Shells out to `git` via `tokio::process::Command`. Every query is a
//! read-only round-trip; nothing here writes to the repository.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from running git commands.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        source: std::io::Error,
    },

    #[error("git {operation} failed (exit {status}): {stderr}")]
    Command {
        operation: String,
        status: String,
        stderr: String,
    },

    #[error("git {operation} produced invalid UTF-8: {source}")]
    Encoding {
        operation: String,
        source: std::string::FromUtf8Error,
    },
}

/// Handle to a local git repository.
///
/// The root is explicit rather than picked up from the process working
/// directory, so tests can point at fixture repositories.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Find the repository containing `start_dir` via
    /// `git rev-parse --show-toplevel`.
    pub async fn discover(start_dir: &Path) -> Result<Self, GitError> {
        let operation = "rev-parse --show-toplevel";
        let output = tokio::process::Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(start_dir)
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                operation: operation.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Command {
                operation: operation.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self::at(PathBuf::from(root)))
    }

    /// Create a handle for a known repository root.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command in the repository root and return its stdout.
    async fn run(&self, operation: &str, args: &[&str]) -> Result<String, GitError> {
        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                operation: operation.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Command {
                operation: operation.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| GitError::Encoding {
            operation: operation.to_string(),
            source: e,
        })
    }

    /// Name of the currently checked-out branch (`HEAD` when detached).
    pub async fn current_branch(&self) -> Result<String, GitError> {
        let out = self
            .run("rev-parse --abbrev-ref", &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;
        Ok(out.trim().to_string())
    }

    /// Resolve the commit at which `base` and `head` diverge.
    ///
    /// Returns `Ok(None)` when git exits non-zero — an unknown base ref
    /// and a missing common ancestor both land here — so callers get a
    /// typed result instead of matching stderr text. `Err` is reserved
    /// for the subprocess itself failing to run.
    pub async fn merge_base(&self, base: &str, head: &str) -> Result<Option<String>, GitError> {
        let output = tokio::process::Command::new("git")
            .args(["merge-base", base, head])
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                operation: "merge-base".to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Ok(None);
        }

        Ok(Some(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }

    /// Paths changed between two commits (`git diff --name-only`).
    pub async fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, GitError> {
        let out = self
            .run("diff --name-only", &["diff", "--name-only", from, to])
            .await?;
        Ok(out
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Full diff of one path between two commits.
    pub async fn diff_range(&self, from: &str, to: &str, path: &str) -> Result<String, GitError> {
        self.run("diff", &["diff", from, to, "--", path]).await
    }

    /// Diff of one path against the working tree (no base argument).
    pub async fn diff_worktree(&self, path: &str) -> Result<String, GitError> {
        self.run("diff", &["diff", "--", path]).await
    }

    /// Raw `git status --porcelain` output for the working tree.
    pub async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run("status --porcelain", &["status", "--porcelain"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn git(dir: &Path, args: &[&str]) {
        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    async fn init_repo(dir: &Path) {
        git(dir, &["init", "-b", "master"]).await;
        git(dir, &["config", "user.email", "test@test.com"]).await;
        git(dir, &["config", "user.name", "Test"]).await;
        git(dir, &["config", "commit.gpgsign", "false"]).await;
    }

    #[tokio::test]
    async fn discover_non_git_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = GitRepo::discover(dir.path()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("rev-parse"), "got: {err}");
    }

    #[tokio::test]
    async fn discover_finds_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        init_repo(p).await;
        tokio::fs::create_dir(p.join("sub")).await.unwrap();

        let repo = GitRepo::discover(&p.join("sub")).await.unwrap();
        assert_eq!(
            repo.root().canonicalize().unwrap(),
            p.canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn current_branch_returns_name() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        init_repo(p).await;
        tokio::fs::write(p.join("file.txt"), "hello\n").await.unwrap();
        git(p, &["add", "."]).await;
        git(p, &["commit", "-m", "init"]).await;

        let repo = GitRepo::at(p);
        assert_eq!(repo.current_branch().await.unwrap(), "master");
    }

    #[tokio::test]
    async fn merge_base_unknown_ref_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        init_repo(p).await;
        tokio::fs::write(p.join("file.txt"), "hello\n").await.unwrap();
        git(p, &["add", "."]).await;
        git(p, &["commit", "-m", "init"]).await;

        let repo = GitRepo::at(p);
        let result = repo.merge_base("no-such-branch", "master").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn merge_base_of_branch_and_itself() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        init_repo(p).await;
        tokio::fs::write(p.join("file.txt"), "hello\n").await.unwrap();
        git(p, &["add", "."]).await;
        git(p, &["commit", "-m", "init"]).await;

        let repo = GitRepo::at(p);
        let sha = repo.merge_base("master", "master").await.unwrap();
        assert!(sha.is_some());
        assert_eq!(sha.unwrap().len(), 40);
    }

    #[tokio::test]
    async fn diff_worktree_sees_unstaged_edit() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        init_repo(p).await;
        tokio::fs::write(p.join("file.txt"), "hello\n").await.unwrap();
        git(p, &["add", "."]).await;
        git(p, &["commit", "-m", "init"]).await;
        tokio::fs::write(p.join("file.txt"), "hello\nworld\n")
            .await
            .unwrap();

        let repo = GitRepo::at(p);
        let diff = repo.diff_worktree("file.txt").await.unwrap();
        assert!(diff.contains("+world"), "diff should contain the edit");
    }
}
