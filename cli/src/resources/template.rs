//! Template sources and rendering.
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::error::SetupError;
use crate::operations::FileSystemOps;

/// A template one directory below the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the repository root.
    pub relative: PathBuf,
    /// Absolute path of the template source.
    pub source: PathBuf,
    /// File name with the template suffix stripped.
    pub base_name: String,
}

impl TemplateFile {
    /// Where the rendered output is written.
    #[must_use]
    pub fn output_path(&self, generated_dir: &Path) -> PathBuf {
        generated_dir.join(&self.base_name)
    }
}

/// Find `*/*<suffix>` templates under `root`, sorted by relative path.
///
/// # Errors
///
/// Returns an error if the tree cannot be read.
pub fn discover(root: &Path, suffix: &str) -> Result<Vec<TemplateFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let Some(base_name) = name.strip_suffix(suffix).filter(|b| !b.is_empty()) else {
            continue;
        };
        files.push(TemplateFile {
            relative: entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf(),
            source: entry.path().to_path_buf(),
            base_name: base_name.to_string(),
        });
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

/// Values visible to templates.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateBindings {
    /// Install root.
    pub dotfiles_home: String,
    /// Repository root.
    pub dotfiles_root: String,
    /// Suffix that marks linkable files.
    pub symlink_suffix: String,
    /// Process environment.
    pub env: BTreeMap<String, String>,
}

impl TemplateBindings {
    /// Bindings for `settings` with the given environment.
    ///
    /// Variables whose name is not UTF-8 are left out; values are converted
    /// lossily.
    #[must_use]
    pub fn new<I>(settings: &Settings, env: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let env = env
            .into_iter()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                Some((name, value.to_string_lossy().into_owned()))
            })
            .collect();
        Self {
            dotfiles_home: settings.install_root.to_string_lossy().into_owned(),
            dotfiles_root: settings.root.to_string_lossy().into_owned(),
            symlink_suffix: settings.options.symlink_suffix.clone(),
            env,
        }
    }

    /// Bindings for `settings` with the current process environment.
    #[must_use]
    pub fn from_process(settings: &Settings) -> Self {
        Self::new(settings, std::env::vars_os())
    }
}

/// Render `template` against `bindings`.
///
/// # Errors
///
/// Returns [`SetupError::Template`] if the source is not UTF-8 or fails to
/// render, or an error if it cannot be read.
pub fn render(
    template: &TemplateFile,
    bindings: &TemplateBindings,
    fs: &dyn FileSystemOps,
) -> Result<String> {
    let bytes = fs.read(&template.source)?;
    let source = String::from_utf8(bytes).map_err(|_| SetupError::Template {
        file: template.relative.clone(),
        message: "template is not valid UTF-8".to_string(),
    })?;
    let context = tera::Context::from_serialize(bindings).map_err(|e| SetupError::Template {
        file: template.relative.clone(),
        message: error_chain(&e),
    })?;
    let rendered =
        tera::Tera::one_off(&source, &context, false).map_err(|e| SetupError::Template {
            file: template.relative.clone(),
            message: error_chain(&e),
        })?;
    Ok(rendered)
}

/// Tera reports the useful detail in nested sources.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
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
    use crate::operations::MockFileSystemOps;
    use crate::tasks::test_helpers::settings;

    fn bindings() -> TemplateBindings {
        TemplateBindings {
            dotfiles_home: "/tmp/home".to_string(),
            dotfiles_root: "/repo".to_string(),
            symlink_suffix: ".symlink".to_string(),
            env: BTreeMap::from([("USER".to_string(), "alice".to_string())]),
        }
    }

    fn template(rel: &str, base: &str) -> TemplateFile {
        TemplateFile {
            relative: PathBuf::from(rel),
            source: PathBuf::from("/repo").join(rel),
            base_name: base.to_string(),
        }
    }

    fn mock_reading(contents: &'static str) -> MockFileSystemOps {
        let mut fs = MockFileSystemOps::new();
        fs.expect_read()
            .returning(move |_| Ok(contents.as_bytes().to_vec()));
        fs
    }

    #[test]
    fn discover_only_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("git/nested")).unwrap();
        std::fs::create_dir_all(root.join(".hidden")).unwrap();
        std::fs::write(root.join("top.template"), "").unwrap();
        std::fs::write(root.join("git/gitconfig.symlink.template"), "").unwrap();
        std::fs::write(root.join("git/nested/deep.template"), "").unwrap();
        std::fs::write(root.join(".hidden/secret.template"), "").unwrap();

        let files = discover(root, ".template").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, PathBuf::from("git/gitconfig.symlink.template"));
        assert_eq!(files[0].base_name, "gitconfig.symlink");
        assert_eq!(
            files[0].output_path(Path::new("/repo/generated")),
            PathBuf::from("/repo/generated/gitconfig.symlink")
        );
    }

    #[test]
    fn renders_bindings() {
        let fs = mock_reading("[user]\n  name = {{ env.USER }}\n  home = {{ dotfiles_home }}\n");
        let out = render(&template("git/gitconfig.template", "gitconfig"), &bindings(), &fs).unwrap();
        assert_eq!(out, "[user]\n  name = alice\n  home = /tmp/home\n");
    }

    #[test]
    fn no_autoescaping() {
        let fs = mock_reading("{{ dotfiles_root }}/<bin>&");
        let out = render(&template("a/b.template", "b"), &bindings(), &fs).unwrap();
        assert_eq!(out, "/repo/<bin>&");
    }

    #[test]
    fn undefined_variable_is_a_template_error() {
        let fs = mock_reading("{{ nope }}");
        let err = render(&template("a/b.template", "b"), &bindings(), &fs).unwrap_err();
        match err.downcast_ref::<SetupError>() {
            Some(SetupError::Template { file, message }) => {
                assert_eq!(file, &PathBuf::from("a/b.template"));
                assert!(message.contains("nope"), "message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_a_template_error() {
        let mut fs = MockFileSystemOps::new();
        fs.expect_read().returning(|_| Ok(vec![0xff, 0xfe]));
        let err = render(&template("a/b.template", "b"), &bindings(), &fs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::Template { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_environment_is_tolerated() {
        use std::os::unix::ffi::OsStringExt as _;

        let settings = settings(Path::new("/repo"), Path::new("/tmp/home"));
        let env = [
            (OsString::from("USER"), OsString::from("alice")),
            (
                OsString::from("LANG_BYTES"),
                OsString::from_vec(vec![b'a', 0xff, 0xfe]),
            ),
            (OsString::from_vec(vec![0xff, b'X']), OsString::from("hidden")),
        ];
        let bindings = TemplateBindings::new(&settings, env);

        assert_eq!(bindings.env.len(), 2);
        assert_eq!(bindings.env["USER"], "alice");
        assert_eq!(bindings.env["LANG_BYTES"], "a\u{fffd}\u{fffd}");
        assert_eq!(bindings.dotfiles_home, "/tmp/home");

        let fs = mock_reading("{{ env.USER }} {{ env.LANG_BYTES }}");
        let out = render(&template("a/b.template", "b"), &bindings, &fs).unwrap();
        assert_eq!(out, "alice a\u{fffd}\u{fffd}");
    }

    #[test]
    fn process_environment_is_available() {
        let settings = settings(Path::new("/repo"), Path::new("/tmp/home"));
        let bindings = TemplateBindings::from_process(&settings);
        assert_eq!(
            bindings.env.len(),
            std::env::vars_os()
                .filter(|(name, _)| name.to_str().is_some())
                .count()
        );
    }
}
