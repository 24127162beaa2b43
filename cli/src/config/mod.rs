//! Run configuration: repository root, install root and file conventions.
pub mod install_root;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SetupError;

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE: &str = "setup.toml";

/// File-naming conventions, optionally overridden by `setup.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileOptions {
    /// Suffix marking a file or directory for installation as a symlink.
    pub symlink_suffix: String,
    /// Suffix marking a template to render into the generated directory.
    pub template_suffix: String,
    /// Directory (relative to the repository root) for rendered templates.
    pub generated_dir: String,
    /// Marker naming an explicit symlink location inside a linkable file.
    pub location_marker: String,
    /// Placeholder in an override location replaced by the install root.
    pub home_placeholder: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            symlink_suffix: ".symlink".to_string(),
            template_suffix: ".template".to_string(),
            generated_dir: "generated".to_string(),
            location_marker: "DOTFILES_SYMLINK_LOCATION".to_string(),
            home_placeholder: "${DOTFILES_HOME}".to_string(),
        }
    }
}

impl FileOptions {
    /// Load options from `<root>/setup.toml`, falling back to defaults when
    /// the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] if the file exists but cannot be parsed,
    /// or names an empty suffix.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let options: Self = toml::from_str(&content).map_err(|e| SetupError::Config {
            path: path.clone(),
            message: e.message().to_string(),
        })?;
        if options.symlink_suffix.is_empty() || options.template_suffix.is_empty() {
            return Err(SetupError::Config {
                path,
                message: "suffixes must not be empty".to_string(),
            }
            .into());
        }
        Ok(options)
    }
}

/// Everything a run needs to know about where things live.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Absolute path of the dotfiles repository.
    pub root: PathBuf,
    /// Directory the dotfiles are linked into.
    pub install_root: PathBuf,
    /// File-naming conventions.
    pub options: FileOptions,
}

impl Settings {
    /// Build settings for `root`, reading `setup.toml` if present.
    ///
    /// The repository root is canonicalized so link sources are absolute.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be canonicalized or the
    /// configuration file is invalid.
    pub fn load(root: &Path, install_root: PathBuf) -> Result<Self> {
        let root = dunce::canonicalize(root)
            .with_context(|| format!("resolving dotfiles root {}", root.display()))?;
        let options = FileOptions::load(&root)?;
        Ok(Self {
            root,
            install_root,
            options,
        })
    }

    /// Directory that receives rendered templates.
    #[must_use]
    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(&self.options.generated_dir)
    }
}
