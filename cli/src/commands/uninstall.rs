//! Uninstall command implementation.
use anyhow::Result;

use crate::config::install_root;
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if the install root fails its checks or a task stops
/// the run.
pub fn run(ctx: &mut Context, log: &Logger) -> Result<()> {
    install_root::check(&ctx.settings.install_root)?;
    let tasks = tasks::all_uninstall_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), ctx, log)
}
