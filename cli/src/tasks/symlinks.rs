//! Symlink installation and removal.
use anyhow::Result;
use std::path::Path;

use super::{Context, Task, TaskResult};
use crate::error::SetupError;
use crate::resources::linkable::{self, LinkTarget, LinkableFile, TargetResolver};

/// Choices offered when a target already exists.
pub const CONFLICT_CHOICES: &str =
    "[s]kip, [S]kip all, [o]verwrite, [O]verwrite all, [b]ackup, [B]ackup all, or [q]uit";

/// Answer to a conflict prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Leave this target alone.
    Skip,
    /// Leave every remaining conflicting target alone.
    SkipAll,
    /// Remove this target and link.
    Overwrite,
    /// Remove every remaining conflicting target and link.
    OverwriteAll,
    /// Move this target aside and link.
    Backup,
    /// Move every remaining conflicting target aside and link.
    BackupAll,
    /// Stop the run.
    Quit,
}

impl ConflictPolicy {
    /// Parse a single-character prompt answer; case matters.
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "s" => Some(Self::Skip),
            "S" => Some(Self::SkipAll),
            "o" => Some(Self::Overwrite),
            "O" => Some(Self::OverwriteAll),
            "b" => Some(Self::Backup),
            "B" => Some(Self::BackupAll),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A policy that answers every remaining conflict of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BatchPolicy {
    /// Leave existing targets alone.
    SkipAll,
    /// Replace existing targets.
    OverwriteAll,
    /// Move existing targets to `<target>.backup`.
    BackupAll,
}

/// What happens to one conflicting target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Skip,
    Overwrite,
    Backup,
}

impl From<BatchPolicy> for Resolution {
    fn from(policy: BatchPolicy) -> Self {
        match policy {
            BatchPolicy::SkipAll => Self::Skip,
            BatchPolicy::OverwriteAll => Self::Overwrite,
            BatchPolicy::BackupAll => Self::Backup,
        }
    }
}

/// Conflict-resolution state of one install run.
///
/// Starts with no batch policy unless one was given up front; the first
/// `*All` answer sets it and suppresses every later prompt.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    batch: Option<BatchPolicy>,
}

impl RunContext {
    /// Start a run with an optional pre-selected batch policy.
    #[must_use]
    pub const fn new(batch: Option<BatchPolicy>) -> Self {
        Self { batch }
    }

    /// The active batch policy, if any.
    #[must_use]
    pub const fn batch(&self) -> Option<BatchPolicy> {
        self.batch
    }

    /// Turn a prompt answer into a resolution, remembering `*All` answers.
    fn answer(&mut self, policy: ConflictPolicy) -> Result<Resolution, SetupError> {
        let batch = match policy {
            ConflictPolicy::Quit => return Err(SetupError::Aborted),
            ConflictPolicy::Skip => return Ok(Resolution::Skip),
            ConflictPolicy::Overwrite => return Ok(Resolution::Overwrite),
            ConflictPolicy::Backup => return Ok(Resolution::Backup),
            ConflictPolicy::SkipAll => BatchPolicy::SkipAll,
            ConflictPolicy::OverwriteAll => BatchPolicy::OverwriteAll,
            ConflictPolicy::BackupAll => BatchPolicy::BackupAll,
        };
        self.batch = Some(batch);
        Ok(batch.into())
    }
}

/// Per-run counters reported in the summary.
#[derive(Debug, Default)]
struct InstallStats {
    linked: usize,
    identical: usize,
    skipped: usize,
    backed_up: usize,
    overwritten: usize,
    not_backed_up: usize,
    failed: usize,
}

impl InstallStats {
    const fn warnings(&self) -> usize {
        self.not_backed_up + self.failed
    }

    fn summary(&self) -> String {
        format!(
            "{} linked, {} identical, {} skipped, {} backed up, {} overwritten, {} failed",
            self.linked,
            self.identical,
            self.skipped,
            self.backed_up,
            self.overwritten,
            self.warnings()
        )
    }
}

/// Discover linkable files and resolve every target before touching anything,
/// so that an invalid override stops the run before the first link.
fn resolve_all(ctx: &Context) -> Result<Vec<(LinkableFile, LinkTarget)>> {
    let settings = &ctx.settings;
    let files = linkable::discover(&settings.root, &settings.options.symlink_suffix)?;
    let resolver = TargetResolver::new(&settings.options, &settings.install_root)?;
    let mut resolved = Vec::with_capacity(files.len());
    for file in files {
        let target = resolver.resolve(&file, false, ctx.fs_ops.as_ref(), ctx.log.as_ref())?;
        resolved.push((file, target));
    }
    Ok(resolved)
}

/// Link every linkable file into the install root.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &str {
        "Install symlinks"
    }

    fn run(&self, ctx: &mut Context) -> Result<TaskResult> {
        let resolved = resolve_all(ctx)?;
        if resolved.is_empty() {
            return Ok(TaskResult::Skipped("no linkable files found".to_string()));
        }

        let mut stats = InstallStats::default();
        for (file, target) in &resolved {
            install_one(ctx, file, target, &mut stats)?;
        }

        ctx.log.info(&stats.summary());
        Ok(match stats.warnings() {
            0 => TaskResult::Ok(stats.summary()),
            warnings => TaskResult::Warned {
                message: stats.summary(),
                warnings,
            },
        })
    }
}

fn install_one(
    ctx: &mut Context,
    file: &LinkableFile,
    target: &LinkTarget,
    stats: &mut InstallStats,
) -> Result<()> {
    linkable::create_parent_dirs_for(target, ctx.fs_ops.as_ref(), ctx.log.as_ref())?;
    let link = &target.path;

    if ctx.fs_ops.entry_exists(link) {
        if ctx.fs_ops.is_same_file(link, &file.source) {
            ctx.log
                .info(&format!("Skipping identical file {}", link.display()));
            stats.identical += 1;
            return Ok(());
        }

        let resolution = match ctx.run.batch() {
            Some(batch) => batch.into(),
            None => {
                let policy = ask_conflict(ctx, link)?;
                ctx.run.answer(policy)?
            }
        };

        match resolution {
            Resolution::Skip => {
                ctx.log.info(&format!("Skipping {}", link.display()));
                stats.skipped += 1;
                return Ok(());
            }
            Resolution::Overwrite => {
                ctx.log.info(&format!("Overwriting {}", link.display()));
                ctx.fs_ops.remove_all(link)?;
                stats.overwritten += 1;
            }
            Resolution::Backup => {
                let backup = target.backup_path();
                if ctx.fs_ops.entry_exists(&backup) {
                    ctx.log.warn(&format!(
                        "Can't backup {} to {} => the destination already exists",
                        link.display(),
                        backup.display()
                    ));
                    stats.not_backed_up += 1;
                    return Ok(());
                }
                ctx.log.info(&format!(
                    "Backing up {} to {}",
                    link.display(),
                    backup.display()
                ));
                ctx.fs_ops.rename(link, &backup)?;
                stats.backed_up += 1;
            }
        }
    }

    ctx.log.info(&format!(
        "Linking {} to {}",
        link.display(),
        file.source.display()
    ));
    match ctx.fs_ops.symlink(&file.source, link) {
        Ok(()) => stats.linked += 1,
        Err(e) => {
            ctx.log.warn(&format!("{e:#}"));
            stats.failed += 1;
        }
    }
    Ok(())
}

fn ask_conflict(ctx: &mut Context, link: &Path) -> Result<ConflictPolicy> {
    let question = format!(
        "File already exists: {}, what do you want to do?",
        link.display()
    );
    let answer = ctx
        .prompter
        .ask(&question, CONFLICT_CHOICES)?
        .ok_or(SetupError::InputClosed)?;
    let policy =
        ConflictPolicy::from_answer(&answer).ok_or(SetupError::UnrecognizedChoice(answer))?;
    Ok(policy)
}

/// Remove installed symlinks and restore backups.
#[derive(Debug)]
pub struct UninstallSymlinks;

impl Task for UninstallSymlinks {
    fn name(&self) -> &str {
        "Remove symlinks"
    }

    fn run(&self, ctx: &mut Context) -> Result<TaskResult> {
        let resolved = resolve_all(ctx)?;
        if resolved.is_empty() {
            return Ok(TaskResult::Skipped("no linkable files found".to_string()));
        }

        let (mut removed, mut restored, mut kept) = (0usize, 0usize, 0usize);
        for (_, target) in &resolved {
            let link = &target.path;
            if ctx.fs_ops.is_symlink(link) {
                ctx.log
                    .info(&format!("Removing symlink at {}", link.display()));
                ctx.fs_ops.remove_all(link)?;
                removed += 1;
            }

            let backup = target.backup_path();
            if !ctx.fs_ops.entry_exists(&backup) {
                continue;
            }
            if ctx.fs_ops.entry_exists(link) {
                ctx.log.warn(&format!(
                    "Can't recover {} from {} => the destination is occupied",
                    link.display(),
                    backup.display()
                ));
                kept += 1;
                continue;
            }
            ctx.log.info(&format!(
                "Recovering original file {} from {}",
                link.display(),
                backup.display()
            ));
            ctx.fs_ops.rename(&backup, link)?;
            restored += 1;
        }

        let message = format!("{removed} removed, {restored} restored");
        ctx.log.info(&message);
        Ok(match kept {
            0 => TaskResult::Ok(message),
            warnings => TaskResult::Warned { message, warnings },
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::operations::MockFileSystemOps;
    use crate::tasks::test_helpers::{make_context, make_fs_context};
    use std::fs;
    use std::path::PathBuf;

    fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn read_link(path: &Path) -> PathBuf {
        fs::read_link(path).unwrap()
    }

    #[test]
    fn answers_are_case_sensitive() {
        assert_eq!(ConflictPolicy::from_answer("s"), Some(ConflictPolicy::Skip));
        assert_eq!(ConflictPolicy::from_answer("S"), Some(ConflictPolicy::SkipAll));
        assert_eq!(ConflictPolicy::from_answer("O"), Some(ConflictPolicy::OverwriteAll));
        assert_eq!(ConflictPolicy::from_answer("B"), Some(ConflictPolicy::BackupAll));
        assert_eq!(ConflictPolicy::from_answer("q"), Some(ConflictPolicy::Quit));
        assert_eq!(ConflictPolicy::from_answer("Q"), None);
        assert_eq!(ConflictPolicy::from_answer("skip"), None);
        assert_eq!(ConflictPolicy::from_answer(""), None);
    }

    #[test]
    fn batch_answers_persist() {
        let mut run = RunContext::default();
        assert_eq!(run.answer(ConflictPolicy::Backup).unwrap(), Resolution::Backup);
        assert_eq!(run.batch(), None);
        assert_eq!(
            run.answer(ConflictPolicy::OverwriteAll).unwrap(),
            Resolution::Overwrite
        );
        assert_eq!(run.batch(), Some(BatchPolicy::OverwriteAll));
        assert!(matches!(
            run.answer(ConflictPolicy::Quit),
            Err(SetupError::Aborted)
        ));
    }

    #[test]
    fn links_fresh_target() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let source = write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        let (mut ctx, log) = make_fs_context(repo.path(), home.path(), "");

        let result = InstallSymlinks.run(&mut ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok(_)));
        assert_eq!(read_link(&home.path().join(".bashrc")), source);
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn second_install_is_a_no_op() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        write(repo.path(), "zsh/zshrc.symlink", "export B=1\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");
        InstallSymlinks.run(&mut ctx).unwrap();

        // No answers available: any prompt would fail with InputClosed.
        let (mut again, _log) = make_fs_context(repo.path(), home.path(), "");
        let result = InstallSymlinks.run(&mut again).unwrap();
        assert_eq!(
            result,
            TaskResult::Ok(
                "0 linked, 2 identical, 0 skipped, 0 backed up, 0 overwritten, 0 failed"
                    .to_string()
            )
        );
    }

    #[test]
    fn backup_answer_moves_existing_file() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let source = write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        write(home.path(), ".bashrc", "original\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "b\n");

        InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(
            fs::read_to_string(home.path().join(".bashrc.backup")).unwrap(),
            "original\n"
        );
        assert_eq!(read_link(&home.path().join(".bashrc")), source);
        assert_eq!(ctx.run.batch(), None);
    }

    #[test]
    fn overwrite_all_prompts_once() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            write(repo.path(), &format!("{name}/{name}rc.symlink"), "new\n");
            write(home.path(), &format!(".{name}rc"), "old\n");
        }
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "O\n");

        let result = InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(
            result,
            TaskResult::Ok(
                "3 linked, 0 identical, 0 skipped, 0 backed up, 3 overwritten, 0 failed"
                    .to_string()
            )
        );
        for name in ["a", "b", "c"] {
            let link = home.path().join(format!(".{name}rc"));
            assert_eq!(fs::read_to_string(link).unwrap(), "new\n");
        }
        assert_eq!(ctx.run.batch(), Some(BatchPolicy::OverwriteAll));
    }

    #[test]
    fn overwrite_removes_directories_recursively() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let source = write(repo.path(), "vim/vim.symlink/vimrc", "set nu\n")
            .parent()
            .unwrap()
            .to_path_buf();
        write(home.path(), ".vim/old/plugin.vim", "\" old\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "o\n");

        InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(read_link(&home.path().join(".vim")), source);
        assert!(home.path().join(".vim/vimrc").exists());
    }

    #[test]
    fn skip_all_leaves_everything() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "new\n");
        write(repo.path(), "b/brc.symlink", "new\n");
        write(home.path(), ".arc", "old\n");
        write(home.path(), ".brc", "old\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "S\n");

        InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(fs::read_to_string(home.path().join(".arc")).unwrap(), "old\n");
        assert_eq!(fs::read_to_string(home.path().join(".brc")).unwrap(), "old\n");
    }

    #[test]
    fn seeded_batch_policy_never_prompts() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "new\n");
        write(home.path(), ".arc", "old\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");
        ctx.run = RunContext::new(Some(BatchPolicy::BackupAll));

        InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(
            fs::read_to_string(home.path().join(".arc.backup")).unwrap(),
            "old\n"
        );
    }

    #[test]
    fn quit_stops_before_later_files() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "new\n");
        write(repo.path(), "b/brc.symlink", "new\n");
        write(home.path(), ".arc", "old\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "q\n");

        let err = InstallSymlinks.run(&mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::Aborted)
        ));
        assert!(home.path().join(".brc").symlink_metadata().is_err());
    }

    #[test]
    fn unrecognized_and_closed_input_abort() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "new\n");
        write(home.path(), ".arc", "old\n");

        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "x\n");
        let err = InstallSymlinks.run(&mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::UnrecognizedChoice(c)) if c == "x"
        ));

        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");
        let err = InstallSymlinks.run(&mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::InputClosed)
        ));
        assert_eq!(fs::read_to_string(home.path().join(".arc")).unwrap(), "old\n");
    }

    #[test]
    fn invalid_override_creates_no_links() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "new\n");
        write(
            repo.path(),
            "z/zrc.symlink",
            "# DOTFILES_SYMLINK_LOCATION: relative/zrc\n",
        );
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");

        let err = InstallSymlinks.run(&mut ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::InvalidOverride { .. })
        ));
        assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
    }

    #[test]
    fn backup_collision_keeps_existing_backup_and_target() {
        let mut fs_ops = MockFileSystemOps::new();
        fs_ops.expect_is_file().return_const(true);
        fs_ops.expect_read().returning(|_| Ok(b"export A=1\n".to_vec()));
        fs_ops.expect_entry_exists().returning(|_| true);
        fs_ops.expect_is_same_file().returning(|_, _| false);
        fs_ops.expect_rename().never();
        fs_ops.expect_remove_all().never();
        fs_ops.expect_symlink().never();

        let repo = tempfile::tempdir().unwrap();
        write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        let (ctx, log) = make_context("b\n");
        let mut ctx = ctx.with_fs_ops(Box::new(fs_ops));
        ctx.settings.root = repo.path().to_path_buf();

        let result = InstallSymlinks.run(&mut ctx).unwrap();
        assert!(matches!(result, TaskResult::Warned { warnings: 1, .. }));
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn link_failure_is_a_warning() {
        let mut fs_ops = MockFileSystemOps::new();
        fs_ops.expect_is_file().return_const(true);
        fs_ops.expect_read().returning(|_| Ok(Vec::new()));
        fs_ops.expect_entry_exists().returning(|_| false);
        fs_ops
            .expect_symlink()
            .times(2)
            .returning(|_, _| Err(anyhow::anyhow!("permission denied")));

        let repo = tempfile::tempdir().unwrap();
        write(repo.path(), "a/arc.symlink", "");
        write(repo.path(), "b/brc.symlink", "");
        let (ctx, _log) = make_context("");
        let mut ctx = ctx.with_fs_ops(Box::new(fs_ops));
        ctx.settings.root = repo.path().to_path_buf();

        let result = InstallSymlinks.run(&mut ctx).unwrap();
        assert!(matches!(result, TaskResult::Warned { warnings: 2, .. }));
    }

    #[test]
    fn uninstall_restores_backup() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        write(home.path(), ".bashrc", "original\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "b\n");
        InstallSymlinks.run(&mut ctx).unwrap();

        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");
        let result = UninstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(result, TaskResult::Ok("1 removed, 1 restored".to_string()));
        let restored = home.path().join(".bashrc");
        assert!(!restored.symlink_metadata().unwrap().is_symlink());
        assert_eq!(fs::read_to_string(restored).unwrap(), "original\n");
        assert!(!home.path().join(".bashrc.backup").exists());
    }

    #[test]
    fn uninstall_keeps_backup_when_target_is_occupied() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        write(home.path(), ".bashrc", "user edit\n");
        write(home.path(), ".bashrc.backup", "original\n");
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");

        let result = UninstallSymlinks.run(&mut ctx).unwrap();
        assert!(matches!(result, TaskResult::Warned { warnings: 1, .. }));
        assert_eq!(
            fs::read_to_string(home.path().join(".bashrc")).unwrap(),
            "user edit\n"
        );
        assert_eq!(
            fs::read_to_string(home.path().join(".bashrc.backup")).unwrap(),
            "original\n"
        );
    }

    #[test]
    fn uninstall_never_creates_override_parents() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        write(
            repo.path(),
            "vim/vimrc.symlink",
            "# DOTFILES_SYMLINK_LOCATION: ${DOTFILES_HOME}/.config/nvim/init.vim\n",
        );
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");

        UninstallSymlinks.run(&mut ctx).unwrap();
        assert!(!home.path().join(".config").exists());
    }

    #[cfg(unix)]
    #[test]
    fn linked_directory_source_does_not_block_the_run() {
        let repo = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let bashrc = write(repo.path(), "bash/bashrc.symlink", "export A=1\n");
        write(repo.path(), "real/nvim/init.vim", "set nu\n");
        let nvim = repo.path().join("vim/nvim.symlink");
        fs::create_dir_all(nvim.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(repo.path().join("real/nvim"), &nvim).unwrap();
        std::os::unix::fs::symlink(repo.path().join("gone"), repo.path().join("vim/gone.symlink"))
            .unwrap();
        let (mut ctx, _log) = make_fs_context(repo.path(), home.path(), "");

        InstallSymlinks.run(&mut ctx).unwrap();
        assert_eq!(read_link(&home.path().join(".bashrc")), bashrc);
        assert_eq!(read_link(&home.path().join(".nvim")), nvim);
        assert!(home.path().join(".nvim/init.vim").is_file());
        assert!(home.path().join(".gone").symlink_metadata().is_ok());
    }
}
