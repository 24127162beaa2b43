//! Repository sync.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::error::SetupError;

/// Pull latest changes and refresh submodules.
#[derive(Debug)]
pub struct SyncRepository;

impl Task for SyncRepository {
    fn name(&self) -> &str {
        "Sync repository"
    }

    fn run(&self, ctx: &mut Context) -> Result<TaskResult> {
        let root = ctx.settings.root.clone();
        if !ctx.vcs.is_repository(&root) {
            return Ok(TaskResult::Skipped(format!(
                "{} is not a git repository",
                root.display()
            )));
        }

        // Checked before any network operation.
        if ctx
            .vcs
            .has_local_changes(&root)
            .context("checking working tree status")?
        {
            return Err(SetupError::DirtyWorkingTree.into());
        }

        let mut warnings = 0;

        ctx.log.info("Pulling latest changes...");
        if let Err(e) = ctx.vcs.pull(&root) {
            ctx.log.warn(&format!("git pull failed: {e:#}"));
            warnings += 1;
        }

        ctx.log.info("Synchronizing git submodule URLs...");
        if let Err(e) = ctx.vcs.sync_submodules(&root) {
            ctx.log.warn(&format!("git submodule sync failed: {e:#}"));
            warnings += 1;
        }

        ctx.log.info("Fetching any newly added git submodules...");
        if let Err(e) = ctx.vcs.update_submodules(&root) {
            ctx.log
                .warn(&format!("git submodule update failed: {e:#}"));
            warnings += 1;
        }

        let message = "pulled and refreshed submodules".to_string();
        Ok(match warnings {
            0 => TaskResult::Ok(message),
            warnings => TaskResult::Warned { message, warnings },
        })
    }
}
