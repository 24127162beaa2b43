#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `update` command.

mod common;

use std::rc::Rc;

use common::{FakeVcs, TestRepo};
use dotfiles_setup::commands;
use dotfiles_setup::error::exit_code_for;
use dotfiles_setup::logging::TaskStatus;

#[test]
fn dirty_tree_fails_without_network_calls() {
    let repo = TestRepo::builder().build();
    let vcs = FakeVcs {
        dirty: true,
        ..FakeVcs::default()
    };
    let calls = Rc::clone(&vcs.calls);
    let (mut ctx, log) = repo.context("", vcs);

    let err = commands::update::run(&mut ctx, &log).unwrap_err();

    assert_eq!(exit_code_for(&err), 1);
    assert!(err.to_string().contains("the working directory is dirty"));
    assert_eq!(*calls.borrow(), ["status"]);
    assert_eq!(log.failure_count(), 1);
}

#[test]
fn clean_tree_pulls_and_refreshes_submodules() {
    let repo = TestRepo::builder().build();
    let vcs = FakeVcs::default();
    let calls = Rc::clone(&vcs.calls);
    let (mut ctx, log) = repo.context("", vcs);

    commands::update::run(&mut ctx, &log).unwrap();

    assert_eq!(
        *calls.borrow(),
        ["status", "pull", "submodule sync", "submodule update"]
    );
    let entries = log.task_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, TaskStatus::Ok);
}

#[test]
fn update_does_not_touch_the_install_root() {
    let repo = TestRepo::builder()
        .with_file("bash/bashrc.symlink", "")
        .build();
    let (mut ctx, log) = repo.context("", FakeVcs::default());

    commands::update::run(&mut ctx, &log).unwrap();

    assert!(repo.home_path(".bashrc").symlink_metadata().is_err());
}

#[test]
fn failed_pull_still_refreshes_submodules() {
    let repo = TestRepo::builder().build();
    let vcs = FakeVcs {
        pull_fails: true,
        ..FakeVcs::default()
    };
    let (mut ctx, log) = repo.context("", vcs);

    commands::update::run(&mut ctx, &log).unwrap();

    let entries = log.task_entries();
    assert_eq!(entries[0].status, TaskStatus::Warned);
    assert_eq!(
        entries[0].message.as_deref(),
        Some("pulled and refreshed submodules (1 warning(s))")
    );
}
