//! Install root resolution and precondition checks.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SetupError;

/// Environment variable overriding the install root (useful for testing).
pub const HOME_OVERRIDE_VAR: &str = "DOTFILES_HOME";

/// Pick the install root: explicit CLI value, then `DOTFILES_HOME`, then the
/// platform home directory.
///
/// Empty values are treated as unset.
///
/// # Errors
///
/// Returns [`SetupError::InstallRootUnset`] when none of the sources is set.
pub fn resolve(
    explicit: Option<&Path>,
    dotfiles_home: Option<&str>,
    home: Option<&str>,
) -> Result<PathBuf, SetupError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dotfiles_home
        .into_iter()
        .chain(home)
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(SetupError::InstallRootUnset)
}

/// Resolve the install root from the process environment.
///
/// # Errors
///
/// Returns [`SetupError::InstallRootUnset`] when no home directory is set.
pub fn from_env(explicit: Option<&Path>) -> Result<PathBuf, SetupError> {
    let dotfiles_home = std::env::var(HOME_OVERRIDE_VAR).ok();
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok();
    resolve(explicit, dotfiles_home.as_deref(), home.as_deref())
}

/// Verify that `path` exists, is a directory and is writable.
///
/// Writability is probed by creating and removing a scratch file, which
/// reflects ACLs and read-only mounts that permission bits do not.
///
/// # Errors
///
/// Returns the matching [`SetupError`] precondition variant.
pub fn check(path: &Path) -> Result<(), SetupError> {
    let meta =
        fs::metadata(path).map_err(|_| SetupError::InstallRootMissing(path.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(SetupError::InstallRootNotDirectory(path.to_path_buf()));
    }

    let probe = path.join(format!(".dotfiles-write-check-{}", std::process::id()));
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(_) => {
            fs::remove_file(&probe).ok();
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(_) => Err(SetupError::InstallRootNotWritable(path.to_path_buf())),
    }
}
