//! Update command implementation.
use anyhow::Result;

use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the update command: repository sync only.
///
/// # Errors
///
/// Returns an error if the working tree is dirty or its status cannot be read.
pub fn run(ctx: &mut Context, log: &Logger) -> Result<()> {
    let tasks = tasks::all_update_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), ctx, log)
}
