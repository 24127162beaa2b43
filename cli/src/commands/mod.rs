//! Top-level action orchestration.
pub mod install;
pub mod uninstall;
pub mod update;

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Action, GlobalOpts};
use crate::config::{Settings, install_root};
use crate::logging::{Log, Logger};
use crate::tasks::symlinks::RunContext;
use crate::tasks::{self, Context, Task};

/// Pick the dotfiles repository: `--root` (or `DOTFILES_ROOT`), else the
/// current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    match &global.root {
        Some(root) => Ok(root.clone()),
        None => std::env::current_dir().context("determining current directory"),
    }
}

/// Build the run context for the real system from the command-line options.
///
/// # Errors
///
/// Returns an error if the install root cannot be determined or the
/// repository settings cannot be loaded.
pub fn prepare(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Context> {
    let root = resolve_root(global)?;
    let install_root = install_root::from_env(global.home.as_deref())?;
    let settings = Settings::load(&root, install_root)?;
    log.debug(&format!("dotfiles root: {}", settings.root.display()));
    log.debug(&format!(
        "install root: {}",
        settings.install_root.display()
    ));
    Ok(Context::new(
        settings,
        Arc::clone(log) as Arc<dyn Log>,
        RunContext::new(global.on_conflict),
    ))
}

/// Run `action` against `ctx`.
///
/// # Errors
///
/// Returns the error that stopped the run.
pub fn run(action: Action, global: &GlobalOpts, ctx: &mut Context, log: &Logger) -> Result<()> {
    match action {
        Action::Install => install::run(ctx, log, !global.no_sync),
        Action::Update => update::run(ctx, log),
        Action::Uninstall => uninstall::run(ctx, log),
        Action::Usage => Ok(()),
    }
}

/// Execute tasks in order until one fails, then print the summary.
///
/// # Errors
///
/// Returns the error of the first task that failed.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &mut Context,
    log: &Logger,
) -> Result<()> {
    let mut outcome = Ok(());
    for task in tasks {
        if let Err(e) = tasks::execute(task, ctx) {
            outcome = Err(e);
            break;
        }
    }

    log.print_summary();
    outcome
}
