//! Linkable files and their install targets.
use anyhow::{Context as _, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::FileOptions;
use crate::error::SetupError;
use crate::logging::Log;
use crate::operations::FileSystemOps;

/// A file or directory in the dotfiles tree marked for installation as a symlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkableFile {
    /// Path relative to the repository root.
    pub relative: PathBuf,
    /// Absolute path the symlink will point to.
    pub source: PathBuf,
    /// File name with the linkable suffix stripped.
    pub base_name: String,
}

/// Where a linkable file is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Absolute destination of the symlink.
    pub path: PathBuf,
    /// Whether the location came from an in-file override.
    pub overridden: bool,
}

impl LinkTarget {
    /// Sibling path that receives the pre-existing file on backup.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".backup");
        PathBuf::from(name)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Find every linkable file under `root`, sorted by relative path.
///
/// Hidden entries are ignored. A linkable directory is returned as a single
/// entry and not descended into.
///
/// # Errors
///
/// Returns an error if part of the tree cannot be read.
pub fn discover(root: &Path, suffix: &str) -> Result<Vec<LinkableFile>> {
    let mut files = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let name = entry.file_name().to_string_lossy();
        let Some(base_name) = name.strip_suffix(suffix) else {
            continue;
        };
        if base_name.is_empty() {
            continue;
        }
        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        files.push(LinkableFile {
            base_name: base_name.to_string(),
            source: entry.path().to_path_buf(),
            relative,
        });
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

/// Finds the symlink location override inside a linkable file.
///
/// The override is a comment line of the form
/// `# DOTFILES_SYMLINK_LOCATION: <path>`; the first matching line wins.
#[derive(Debug, Clone)]
pub struct OverrideMatcher {
    pattern: Regex,
    placeholder: String,
    install_root: String,
}

impl OverrideMatcher {
    /// Build a matcher for the configured marker that expands the home
    /// placeholder to `install_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker does not form a valid pattern.
    pub fn new(options: &FileOptions, install_root: &Path) -> Result<Self> {
        let pattern = format!(
            r"(?m)^#\s*{}:\s*(\S+)\s*$",
            regex::escape(&options.location_marker)
        );
        Ok(Self {
            pattern: Regex::new(&pattern).context("building override pattern")?,
            placeholder: options.home_placeholder.clone(),
            install_root: install_root.to_string_lossy().into_owned(),
        })
    }

    /// Return the expanded override location in `contents`, if any.
    #[must_use]
    pub fn find(&self, contents: &str) -> Option<String> {
        let location = self.pattern.captures(contents)?.get(1)?.as_str();
        Some(location.replace(&self.placeholder, &self.install_root))
    }
}

/// Computes install targets for linkable files.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    install_root: PathBuf,
    matcher: OverrideMatcher,
}

impl TargetResolver {
    /// Create a resolver that installs into `install_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override marker is invalid.
    pub fn new(options: &FileOptions, install_root: &Path) -> Result<Self> {
        Ok(Self {
            install_root: install_root.to_path_buf(),
            matcher: OverrideMatcher::new(options, install_root)?,
        })
    }

    /// Resolve the target of `file`.
    ///
    /// Defaults to `<install_root>/.<base_name>`; an override line in the
    /// file replaces it. Only sources that resolve to a regular file are read,
    /// so directories, links to directories and dangling links keep the
    /// default. When `create_parent_dirs` is set and an override is used, the
    /// override's missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidOverride`] if the override is not an
    /// absolute path, or an error if the file cannot be read.
    pub fn resolve(
        &self,
        file: &LinkableFile,
        create_parent_dirs: bool,
        fs: &dyn FileSystemOps,
        log: &dyn Log,
    ) -> Result<LinkTarget> {
        let default = self.install_root.join(format!(".{}", file.base_name));
        if !fs.is_file(&file.source) {
            return Ok(LinkTarget {
                path: default,
                overridden: false,
            });
        }

        let contents = fs.read(&file.source)?;
        let Some(location) = self.matcher.find(&String::from_utf8_lossy(&contents)) else {
            return Ok(LinkTarget {
                path: default,
                overridden: false,
            });
        };

        log.info(&format!(
            "A symlink location override exists for dotfile '{}': using '{location}' instead of '{}'",
            file.relative.display(),
            default.display()
        ));
        let path = PathBuf::from(&location);
        if !path.is_absolute() {
            return Err(SetupError::InvalidOverride {
                file: file.relative.clone(),
                location,
            }
            .into());
        }

        let target = LinkTarget {
            path,
            overridden: true,
        };
        if create_parent_dirs {
            create_parent_dirs_for(&target, fs, log)?;
        }
        Ok(target)
    }
}

/// Create the missing parent chain of an overridden target.
///
/// Default targets live directly in the install root and need nothing.
///
/// # Errors
///
/// Returns an error if a directory cannot be created.
pub fn create_parent_dirs_for(
    target: &LinkTarget,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
) -> Result<()> {
    if !target.overridden {
        return Ok(());
    }
    if let Some(parent) = target.path.parent()
        && !fs.entry_exists(parent)
    {
        log.info(&format!(
            "Creating any missing parent directories for symlink override path {}",
            target.path.display()
        ));
        fs.create_dir_all(parent)?;
    }
    Ok(())
}
