//! The change collector: assembles the diff payload for a scan.
//!
//! A scan covers everything the current branch has done since it forked
//! from the base branch — the merge-base, not the base branch's current
//! tip, so changes the base picked up after the fork never leak into
//! the payload — plus whatever is sitting uncommitted in the working
//! tree.

use thiserror::Error;

use crate::constants;
use crate::models::ChangeSet;

use super::repo::{GitError, GitRepo};
use super::status;

/// Errors from change collection.
#[derive(Error, Debug)]
pub enum CollectError {
    /// The divergence point between the base branch and the current
    /// branch could not be determined.
    #[error(
        "could not determine where '{base}' and '{branch}' diverge — \
         verify that the base branch exists and shares history with the current branch"
    )]
    DivergencePoint { base: String, branch: String },

    /// A single file's diff could not be retrieved.
    #[error("failed to retrieve diff for '{path}'")]
    DiffRetrieval {
        path: String,
        #[source]
        source: GitError,
    },

    /// Any other repository query failure.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Collects the source-file changes a branch has accumulated since it
/// forked from a base branch, including uncommitted working-tree edits.
pub struct ChangeCollector {
    repo: GitRepo,
    base_branch: String,
    extensions: Vec<String>,
}

impl ChangeCollector {
    /// Create a collector with the default base branch and extension
    /// allow-list.
    pub fn new(repo: GitRepo) -> Self {
        Self {
            repo,
            base_branch: constants::DEFAULT_BASE_BRANCH.to_string(),
            extensions: constants::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Override the base branch the scan diffs against.
    pub fn with_base_branch(mut self, base: impl Into<String>) -> Self {
        self.base_branch = base.into();
        self
    }

    /// Override the source-extension allow-list.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    fn matches_extension(&self, path: &str) -> bool {
        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    /// Collect all reviewable changes into a [`ChangeSet`].
    ///
    /// Committed changes since the merge-base come first, then
    /// uncommitted working-tree changes for files not already recorded
    /// (committed entries win). An empty result is valid — it means
    /// there is nothing to review. Any failure aborts the whole
    /// collection; no partial set escapes.
    pub async fn collect(&self) -> Result<ChangeSet, CollectError> {
        let branch = self.repo.current_branch().await?;

        let merge_base = self
            .repo
            .merge_base(&self.base_branch, &branch)
            .await?
            .ok_or_else(|| CollectError::DivergencePoint {
                base: self.base_branch.clone(),
                branch: branch.clone(),
            })?;

        let mut changes = ChangeSet::new();

        for path in self.repo.changed_files(&merge_base, "HEAD").await? {
            if !self.matches_extension(&path) {
                continue;
            }
            let diff = self
                .repo
                .diff_range(&merge_base, "HEAD", &path)
                .await
                .map_err(|e| CollectError::DiffRetrieval {
                    path: path.clone(),
                    source: e,
                })?;
            changes.insert(path, diff);
        }

        let porcelain = self.repo.status_porcelain().await?;
        for path in status::uncommitted_paths(&porcelain) {
            if !self.matches_extension(&path) || changes.contains(&path) {
                continue;
            }
            let diff = self
                .repo
                .diff_worktree(&path)
                .await
                .map_err(|e| CollectError::DiffRetrieval {
                    path: path.clone(),
                    source: e,
                })?;
            changes.insert(path, diff);
        }

        Ok(changes)
    }
}
