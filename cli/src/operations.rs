//! Filesystem operation abstractions for dependency injection.
//!
//! Installer, uninstaller and template code touch the filesystem only through
//! [`FileSystemOps`], so unit tests can verify which mutations happen (or do
//! not happen) without staging them on disk.  Production code uses
//! [`SystemFileSystemOps`]; unit tests use the generated `MockFileSystemOps`.
use anyhow::{Context as _, Result};
use std::path::Path;

use crate::error::SetupError;

/// Filesystem queries and mutations used by tasks.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemOps {
    /// Returns `true` if anything exists at `path`, including a dangling symlink.
    fn entry_exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` itself is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Returns `true` if `path` resolves, through any symlinks, to a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `a` and `b` resolve to the same underlying file.
    fn is_same_file(&self, a: &Path, b: &Path) -> bool;

    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Create `path` and all missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove whatever exists at `path`; real directories are removed recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove_all(&self, path: &Path) -> Result<()>;

    /// Move `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Create a symbolic link at `link` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn symlink(&self, source: &Path, link: &Path) -> Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn entry_exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok_and(|m| m.is_symlink())
    }

    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|m| m.is_file())
    }

    fn is_same_file(&self, a: &Path, b: &Path) -> bool {
        same_file(a, b)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(io_error(path)).context("reading file")
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::write(path, contents)
            .map_err(io_error(path))
            .context("writing file")
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .map_err(io_error(path))
            .context("creating directory")
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        let meta = std::fs::symlink_metadata(path)
            .map_err(io_error(path))
            .context("reading metadata")?;
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
                .map_err(io_error(path))
                .context("removing directory")
        } else {
            remove_symlink(path, &meta)
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::rename(from, to)
            .map_err(io_error(from))
            .with_context(|| format!("moving to {}", to.display()))
    }

    fn symlink(&self, source: &Path, link: &Path) -> Result<()> {
        create_symlink(source, link)
            .map_err(io_error(link))
            .with_context(|| format!("creating symlink to {}", source.display()))
    }
}

/// Attach `path` to an I/O error.
fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SetupError + '_ {
    move |source| SetupError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Compare two paths by the identity of the file they resolve to.
///
/// Dangling paths are never the same file.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt as _;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Remove a file or symlink.
///
/// On Windows a symlink to a directory carries `FILE_ATTRIBUTE_DIRECTORY`
/// and must be removed with `remove_dir`.
fn remove_symlink(path: &Path, meta: &std::fs::Metadata) -> Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt as _;
        if meta.file_attributes() & 0x10 != 0 {
            return std::fs::remove_dir(path)
                .map_err(io_error(path))
                .context("removing directory link");
        }
    }
    #[cfg(not(windows))]
    let _ = meta;
    std::fs::remove_file(path)
        .map_err(io_error(path))
        .context("removing file")
}

fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, link)
        } else {
            std::os::windows::fs::symlink_file(source, link)
        }
    }
}
