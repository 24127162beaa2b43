//! Domain-specific error types for the setup tool.
//!
//! Internal modules return [`anyhow::Result`] and attach context with
//! `.with_context(...)`; the conditions that decide how a run ends are raised
//! as [`SetupError`] so the binary can downcast at the CLI boundary and pick
//! an exit code.
//!
//! # Error taxonomy
//!
//! ```text
//! SetupError
//! ├── InstallRoot*          precondition on the install root (fatal)
//! ├── DirtyWorkingTree      precondition before repository sync (fatal)
//! ├── InvalidOverride       override location is not absolute (fatal)
//! ├── UnrecognizedChoice    unknown answer at a prompt (fatal)
//! ├── InputClosed           prompt input reached end of file (fatal)
//! ├── Aborted               operator answered `q` (fatal, exit 0)
//! ├── Template              template failed to render
//! ├── Config                setup.toml could not be parsed
//! └── Io                    filesystem error on a known path
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Errors that terminate a run.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The install root does not exist.
    #[error("Destination {} doesn't exist!", .0.display())]
    InstallRootMissing(PathBuf),

    /// The install root exists but is not a directory.
    #[error("Destination {} isn't a directory!", .0.display())]
    InstallRootNotDirectory(PathBuf),

    /// The install root cannot be written to.
    #[error("Destination {} isn't writable!", .0.display())]
    InstallRootNotWritable(PathBuf),

    /// No home directory could be determined from the environment.
    #[error("cannot determine install root: set DOTFILES_HOME or HOME")]
    InstallRootUnset,

    /// The dotfiles repository has uncommitted local changes.
    #[error(
        "Can't proceed: the working directory is dirty. Please stash, commit, \
         or reset any changes listed in `git status`."
    )]
    DirtyWorkingTree,

    /// A symlink location override is not an absolute path.
    #[error("Overridden symlink location must be an absolute path: '{location}' in {}", .file.display())]
    InvalidOverride {
        /// Linkable file carrying the override.
        file: PathBuf,
        /// Override location after placeholder expansion.
        location: String,
    },

    /// The operator typed something that is not one of the offered choices.
    #[error("Unrecognized command '{0}', quitting.")]
    UnrecognizedChoice(String),

    /// The prompt input stream closed before an answer was read.
    #[error("no answer received (input closed), quitting.")]
    InputClosed,

    /// The operator chose to quit.
    #[error("aborted by operator")]
    Aborted,

    /// A template failed to render.
    #[error("failed to render template {}: {message}", .file.display())]
    Template {
        /// Template source file.
        file: PathBuf,
        /// Renderer error chain.
        message: String,
    },

    /// The setup configuration file could not be parsed.
    #[error("invalid configuration in {}: {message}", .path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl SetupError {
    /// Process exit code for a run that ended with this error.
    ///
    /// Quitting at a prompt is an operator decision and exits cleanly.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Aborted => 0,
            _ => 1,
        }
    }
}

/// Exit code for an arbitrary run error: the embedded [`SetupError`]'s code
/// when present, `1` otherwise.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SetupError>())
        .map_or(1, SetupError::exit_code)
}
