//! Command-line interface.
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::tasks::symlinks::BatchPolicy;

/// Usage text printed for `help` and for any invocation that is not understood.
pub const USAGE: &str = "\
Usage: setup [OPTIONS] [ACTION]

Valid ACTIONs:
    install (default)      Install Dotfiles to your Home directory. Existing files
                           are backed up before they're overwritten (and are reverted
                           when Dotfiles is uninstalled).
    update                 Update installed Dotfiles.
    uninstall              Uninstall Dotfiles and revert backup files.
    help                   Print this message.

Options:
    -v, --verbose                 Show debug output
        --root <DIR>              Dotfiles repository [env: DOTFILES_ROOT, default: .]
        --home <DIR>              Install root [env: DOTFILES_HOME, default: $HOME]
        --on-conflict <POLICY>    Answer every conflict with skip-all, overwrite-all
                                  or backup-all instead of prompting
        --no-sync                 Install without pulling repository updates
    -h, --help                    Print help
    -V, --version                 Print version";

/// Symlink-based dotfiles installer.
#[derive(Parser, Debug)]
#[command(name = "setup", about = "Symlink-based dotfiles installer", version)]
pub struct Cli {
    /// Action to run: install (default), update, uninstall or help
    #[arg(value_name = "ACTION")]
    pub args: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Options shared by every action.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared by every action.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Dotfiles repository root
    #[arg(long, env = "DOTFILES_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory to install into (overrides DOTFILES_HOME and HOME)
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Resolve every conflict with this policy instead of prompting
    #[arg(long, value_enum)]
    pub on_conflict: Option<BatchPolicy>,

    /// Skip the repository sync during install
    #[arg(long)]
    pub no_sync: bool,
}

/// What the invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Sync, render templates and link.
    Install,
    /// Sync the repository only.
    Update,
    /// Remove links and restore backups.
    Uninstall,
    /// Print usage.
    Usage,
}

impl Action {
    /// Interpret the positional arguments.
    ///
    /// No argument means install; one argument is matched case-insensitively;
    /// anything else prints usage.
    #[must_use]
    pub fn from_args(args: &[String]) -> Self {
        match args {
            [] => Self::Install,
            [one] => match one.to_lowercase().as_str() {
                "install" => Self::Install,
                "update" => Self::Update,
                "uninstall" => Self::Uninstall,
                _ => Self::Usage,
            },
            _ => Self::Usage,
        }
    }

    /// Name used for the log file, or `None` for usage.
    #[must_use]
    pub const fn command_name(self) -> Option<&'static str> {
        match self {
            Self::Install => Some("install"),
            Self::Update => Some("update"),
            Self::Uninstall => Some("uninstall"),
            Self::Usage => None,
        }
    }
}

impl Cli {
    /// The action requested by the positional arguments.
    #[must_use]
    pub fn action(&self) -> Action {
        Action::from_args(&self.args)
    }
}

/// How the process should proceed after reading its arguments.
#[derive(Debug)]
pub enum Invocation {
    /// Run the parsed action.
    Run(Cli),
    /// Print [`USAGE`] and exit successfully.
    Usage,
    /// Help or version output rendered by clap.
    Display(clap::Error),
}

impl Invocation {
    /// Classify `args` (program name first).
    ///
    /// Anything clap cannot parse, and any action that is not understood,
    /// falls back to usage.
    #[must_use]
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) if cli.action() == Action::Usage => Self::Usage,
            Ok(cli) => Self::Run(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Self::Display(e)
            }
            Err(_) => Self::Usage,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("setup").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_installs() {
        assert_eq!(parse(&[]).action(), Action::Install);
    }

    #[test]
    fn actions_are_case_insensitive() {
        assert_eq!(parse(&["INSTALL"]).action(), Action::Install);
        assert_eq!(parse(&["Update"]).action(), Action::Update);
        assert_eq!(parse(&["uninstall"]).action(), Action::Uninstall);
    }

    #[test]
    fn unknown_or_extra_arguments_print_usage() {
        assert_eq!(parse(&["help"]).action(), Action::Usage);
        assert_eq!(parse(&["bogus"]).action(), Action::Usage);
        assert_eq!(parse(&["install", "update"]).action(), Action::Usage);
        assert_eq!(Action::Usage.command_name(), None);
    }

    #[test]
    fn parse_options() {
        let cli = parse(&[
            "-v",
            "--root",
            "/src/dotfiles",
            "--home",
            "/tmp/home",
            "--on-conflict",
            "backup-all",
            "--no-sync",
            "install",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.global.root, Some(PathBuf::from("/src/dotfiles")));
        assert_eq!(cli.global.home, Some(PathBuf::from("/tmp/home")));
        assert_eq!(cli.global.on_conflict, Some(BatchPolicy::BackupAll));
        assert!(cli.global.no_sync);
        assert_eq!(cli.action(), Action::Install);
    }

    #[test]
    fn invalid_policy_is_a_parse_error() {
        let result = Cli::try_parse_from(["setup", "--on-conflict", "overwrite"]);
        assert!(result.is_err());
    }

    #[test]
    fn usage_lists_every_action() {
        for action in ["install", "update", "uninstall", "help"] {
            assert!(USAGE.contains(action), "usage is missing {action}");
        }
    }

    fn invocation(args: &[&str]) -> Invocation {
        Invocation::parse_from(std::iter::once("setup").chain(args.iter().copied()))
    }

    #[test]
    fn unparseable_flags_fall_back_to_usage() {
        assert!(matches!(invocation(&["--bogus"]), Invocation::Usage));
        assert!(matches!(
            invocation(&["--on-conflict", "sometimes"]),
            Invocation::Usage
        ));
        assert!(matches!(invocation(&["install", "--home"]), Invocation::Usage));
    }

    #[test]
    fn unknown_actions_fall_back_to_usage() {
        assert!(matches!(invocation(&["help"]), Invocation::Usage));
        assert!(matches!(invocation(&["frobnicate"]), Invocation::Usage));
        assert!(matches!(invocation(&["install", "update"]), Invocation::Usage));
    }

    #[test]
    fn help_and_version_are_rendered_by_clap() {
        match invocation(&["--help"]) {
            Invocation::Display(e) => assert_eq!(e.kind(), ErrorKind::DisplayHelp),
            other => panic!("unexpected invocation: {other:?}"),
        }
        match invocation(&["-V"]) {
            Invocation::Display(e) => assert_eq!(e.kind(), ErrorKind::DisplayVersion),
            other => panic!("unexpected invocation: {other:?}"),
        }
    }

    #[test]
    fn valid_invocation_runs() {
        match invocation(&["uninstall", "--no-sync"]) {
            Invocation::Run(cli) => {
                assert_eq!(cli.action(), Action::Uninstall);
                assert!(cli.global.no_sync);
            }
            other => panic!("unexpected invocation: {other:?}"),
        }
    }
}
