//! Named tasks that make up the install, update and uninstall commands.
mod context;
pub mod symlinks;
pub mod templates;
pub mod update;

pub use context::Context;

use anyhow::Result;

use crate::error::SetupError;
use crate::logging::TaskStatus;

/// Outcome of a task that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed; the message is shown in the summary.
    Ok(String),
    /// Task completed but some steps failed without stopping the run.
    Warned {
        /// Summary message.
        message: String,
        /// Number of recoverable problems reported.
        warnings: usize,
    },
    /// Task had nothing to do.
    Skipped(String),
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error when the run must stop: a failed precondition, an
    /// aborting prompt answer or an unexpected I/O failure.
    fn run(&self, ctx: &mut Context) -> Result<TaskResult>;
}

/// The tasks run by the install command.
#[must_use]
pub fn all_install_tasks(sync: bool) -> Vec<Box<dyn Task>> {
    let mut tasks: Vec<Box<dyn Task>> = Vec::new();
    if sync {
        tasks.push(Box::new(update::SyncRepository));
    }
    tasks.push(Box::new(templates::RenderTemplates));
    tasks.push(Box::new(symlinks::InstallSymlinks));
    tasks
}

/// The tasks run by the update command.
#[must_use]
pub fn all_update_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(update::SyncRepository)]
}

/// The tasks run by the uninstall command.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(symlinks::UninstallSymlinks)]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error unchanged after recording it; callers stop the run.
pub fn execute(task: &dyn Task, ctx: &mut Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok(message)) => {
            ctx.log
                .record_task(task.name(), TaskStatus::Ok, Some(&message));
            Ok(())
        }
        Ok(TaskResult::Warned { message, warnings }) => {
            ctx.log.record_task(
                task.name(),
                TaskStatus::Warned,
                Some(&format!("{message} ({warnings} warning(s))")),
            );
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Err(e) => {
            let aborted = matches!(e.downcast_ref::<SetupError>(), Some(SetupError::Aborted));
            let status = if aborted {
                TaskStatus::Skipped
            } else {
                TaskStatus::Failed
            };
            ctx.log
                .record_task(task.name(), status, Some(&format!("{e:#}")));
            Err(e)
        }
    }
}
