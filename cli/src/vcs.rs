//! Version-control seam used by repository sync.
use anyhow::Result;
use std::path::Path;

use crate::exec::Executor;

/// Operations the repository sync needs from version control.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Returns `true` if `root` is inside a working tree this client can manage.
    fn is_repository(&self, root: &Path) -> bool;

    /// Returns `true` if the working tree has uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be determined.
    fn has_local_changes(&self, root: &Path) -> Result<bool>;

    /// Fetch and merge remote changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the pull fails.
    fn pull(&self, root: &Path) -> Result<()>;

    /// Synchronize submodule remote URLs with the superproject configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    fn sync_submodules(&self, root: &Path) -> Result<()>;

    /// Fetch and check out any newly added submodules.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    fn update_submodules(&self, root: &Path) -> Result<()>;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug)]
pub struct Git<E> {
    executor: E,
}

impl<E: Executor> Git<E> {
    /// Create a client that runs `git` through `executor`.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E: Executor> VersionControl for Git<E> {
    fn is_repository(&self, root: &Path) -> bool {
        self.executor.which("git")
            && self
                .executor
                .run_in(root, "git", &["rev-parse", "--is-inside-work-tree"])
                .is_ok_and(|r| r.stdout.trim() == "true")
    }

    fn has_local_changes(&self, root: &Path) -> Result<bool> {
        let status = self.executor.run_in(root, "git", &["status", "--porcelain"])?;
        Ok(!status.stdout.trim().is_empty())
    }

    fn pull(&self, root: &Path) -> Result<()> {
        self.executor.run_in(root, "git", &["pull"]).map(drop)
    }

    fn sync_submodules(&self, root: &Path) -> Result<()> {
        self.executor
            .run_in(root, "git", &["submodule", "sync"])
            .map(drop)
    }

    fn update_submodules(&self, root: &Path) -> Result<()> {
        self.executor
            .run_in(root, "git", &["submodule", "update", "--init"])
            .map(drop)
    }
}
