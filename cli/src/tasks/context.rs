use std::sync::Arc;

use crate::config::Settings;
use crate::exec::SystemExecutor;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::vcs::{Git, VersionControl};

use super::symlinks::RunContext;

/// Mutable state shared by the tasks of one run.
pub struct Context {
    /// Repository root, install root and file conventions.
    pub settings: Settings,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Box<dyn FileSystemOps>,
    /// Version-control client used by repository sync.
    pub vcs: Box<dyn VersionControl>,
    /// Source of conflict-resolution answers.
    pub prompter: Box<dyn Prompter>,
    /// Conflict-resolution state carried from one file to the next.
    pub run: RunContext,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("fs_ops", &"<dyn FileSystemOps>")
            .field("vcs", &"<dyn VersionControl>")
            .field("prompter", &"<dyn Prompter>")
            .field("run", &self.run)
            .finish()
    }
}

impl Context {
    /// Context wired to the real filesystem, `git` and the terminal.
    #[must_use]
    pub fn new(settings: Settings, log: Arc<dyn Log>, run: RunContext) -> Self {
        Self {
            settings,
            log,
            fs_ops: Box::new(SystemFileSystemOps),
            vcs: Box::new(Git::new(SystemExecutor)),
            prompter: Box::new(TerminalPrompter),
            run,
        }
    }

    /// Replace the filesystem implementation.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Box<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Replace the version-control client.
    #[must_use]
    pub fn with_vcs(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = vcs;
        self
    }

    /// Replace the prompter.
    #[must_use]
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }
}
