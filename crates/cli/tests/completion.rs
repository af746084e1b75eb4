// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;
use yare::parameterized;

#[parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_mentions_commands(shell: &str) {
    trac2gh()
        .args(["completion", shell])
        .assert()
        .success()
        .stdout(predicate::str::contains("trac2gh"))
        .stdout(predicate::str::contains("record"));
}

#[test]
fn help_lists_command_groups() {
    trac2gh()
        .arg("--help")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket Migration:"))
        .stdout(predicate::str::contains("tickets_expected.tsv"));
}

#[test]
fn version_flag() {
    trac2gh()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
