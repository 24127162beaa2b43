// Shared helpers for integration tests.
//
// Provides a temporary dotfiles repository and install root plus a fluent
// builder, so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use dotfiles_setup::config::Settings;
use dotfiles_setup::logging::{Log, Logger};
use dotfiles_setup::prompt::LinePrompter;
use dotfiles_setup::tasks::Context;
use dotfiles_setup::tasks::symlinks::{BatchPolicy, RunContext};
use dotfiles_setup::vcs::VersionControl;

/// Version control stand-in that records every call.
#[derive(Debug, Clone, Default)]
pub struct FakeVcs {
    /// Whether the repository has uncommitted changes.
    pub dirty: bool,
    /// Whether `git pull` fails.
    pub pull_fails: bool,
    /// Calls made so far, shared with the test.
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl FakeVcs {
    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl VersionControl for FakeVcs {
    fn is_repository(&self, _root: &Path) -> bool {
        true
    }

    fn has_local_changes(&self, _root: &Path) -> Result<bool> {
        self.record("status");
        Ok(self.dirty)
    }

    fn pull(&self, _root: &Path) -> Result<()> {
        self.record("pull");
        if self.pull_fails {
            anyhow::bail!("git pull failed (exit 1): could not resolve host");
        }
        Ok(())
    }

    fn sync_submodules(&self, _root: &Path) -> Result<()> {
        self.record("submodule sync");
        Ok(())
    }

    fn update_submodules(&self, _root: &Path) -> Result<()> {
        self.record("submodule update");
        Ok(())
    }
}

/// A dotfiles repository and an install root, both temporary.
pub struct TestRepo {
    /// Dotfiles repository.
    pub repo: tempfile::TempDir,
    /// Install root standing in for `$HOME`.
    pub home: tempfile::TempDir,
}

impl TestRepo {
    /// Start building an empty repository.
    pub fn builder() -> TestRepoBuilder {
        TestRepoBuilder {
            repo: Self {
                repo: tempfile::tempdir().expect("create repo dir"),
                home: tempfile::tempdir().expect("create home dir"),
            },
        }
    }

    /// Path to the repository root.
    pub fn root(&self) -> &Path {
        self.repo.path()
    }

    /// Path inside the install root.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.path().join(rel)
    }

    /// Source path inside the repository, canonicalized like the installer's.
    pub fn source(&self, rel: &str) -> PathBuf {
        dunce::canonicalize(self.repo.path().join(rel)).expect("canonicalize source")
    }

    /// Build a context answering prompts with `answers`, one per line.
    pub fn context(&self, answers: &str, vcs: FakeVcs) -> (Context, Arc<Logger>) {
        self.context_with_policy(answers, vcs, None)
    }

    /// Build a context with a pre-selected batch policy.
    pub fn context_with_policy(
        &self,
        answers: &str,
        vcs: FakeVcs,
        policy: Option<BatchPolicy>,
    ) -> (Context, Arc<Logger>) {
        let settings =
            Settings::load(self.repo.path(), self.home.path().to_path_buf()).expect("load settings");
        let log = Arc::new(Logger::with_log_file(None));
        let ctx = Context::new(
            settings,
            Arc::clone(&log) as Arc<dyn Log>,
            RunContext::new(policy),
        )
        .with_vcs(Box::new(vcs))
        .with_prompter(Box::new(LinePrompter::new(
            Cursor::new(answers.to_string()),
            std::io::sink(),
        )));
        (ctx, log)
    }

    /// Read a file in the install root.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home_path(rel)).expect("read home file")
    }

    /// Whether `rel` in the install root is a symlink to `source_rel` in the repository.
    pub fn is_linked(&self, rel: &str, source_rel: &str) -> bool {
        std::fs::read_link(self.home_path(rel)).is_ok_and(|t| t == self.source(source_rel))
    }
}

/// Fluent builder for [`TestRepo`].
pub struct TestRepoBuilder {
    repo: TestRepo,
}

impl TestRepoBuilder {
    /// Write `content` to `rel` in the repository.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.repo.repo.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create repo file parent");
        }
        std::fs::write(&path, content).expect("write repo file");
        self
    }

    /// Write `content` to `rel` in the install root.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        let path = self.repo.home.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home file parent");
        }
        std::fs::write(&path, content).expect("write home file");
        self
    }

    /// Finish building.
    pub fn build(self) -> TestRepo {
        self.repo
    }
}
