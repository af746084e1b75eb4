// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn fixme_rewrites_recorded_tickets() {
    let m = Migration::new();
    m.cmd()
        .args(["record", "4567", "https://github.com/example/server/issues/12"])
        .assert()
        .success();
    std::fs::create_dir(m.file("src")).unwrap();
    std::fs::write(m.file("src/tls.py"), "# FIXME:4567:\n# FIXME:99: unknown\n").unwrap();

    m.cmd()
        .args(["fixme", "src"])
        .assert()
        .success()
        .stdout("Updated 1 of 1 files\n");

    assert_eq!(m.read("src/tls.py"), "# FIXME:12:\n# FIXME:99: unknown\n");
}

#[test]
fn fixme_needs_a_config() {
    let temp = TempDir::new().unwrap();
    trac2gh()
        .args(["fixme", "."])
        .current_dir(temp.path())
        .assert()
        .failure();
}
