//! Dotfiles setup engine.
//!
//! Links every `*.symlink` file or directory of a dotfiles repository into
//! the home directory, resolving conflicts with existing files by prompting
//! (skip, overwrite or back up), renders `*/*.template` sources into
//! `generated/`, and keeps the repository itself up to date with `git`.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: repository root, install root and `setup.toml` conventions
//! - **[`resources`]**: discovery of linkable files and templates, target resolution
//! - **[`tasks`]**: named units of work: sync, render, link, unlink
//! - **[`commands`]**: top-level action orchestration (`install`, `update`, `uninstall`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod prompt;
pub mod resources;
pub mod tasks;
pub mod vcs;
