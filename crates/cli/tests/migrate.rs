// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;

#[test]
fn render_then_record_in_planned_order() {
    let m = Migration::new();
    m.ticket(1, "server", "Follow up in #2")
        .ticket(2, "server", "Split from #1");

    m.cmd()
        .args(["plan", "--db", "trac.db", "--observed", "server=0"])
        .assert()
        .success();

    let output = m.cmd().args(["render", "--db", "trac.db"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let payloads: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0]["issue"]["title"], "Ticket 1");
    assert!(payloads[0]["issue"]["body"]
        .as_str()
        .unwrap()
        .contains("Follow up in [#2](https://github.com/example/server/issues/2)"));
    assert_eq!(payloads[0]["issue"]["assignee"], "adiroiban");

    m.cmd()
        .args(["record", "1", "https://github.com/example/server/issues/1"])
        .assert()
        .success()
        .stdout("Recorded trac#1 -> https://github.com/example/server/issues/1\n");

    let output = m.cmd().args(["render", "--db", "trac.db"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("\"title\":\"Ticket 2\""));
}

#[test]
fn record_mismatch_fails_but_keeps_the_record() {
    let m = Migration::new();
    m.ticket(1, "server", "");
    m.cmd()
        .args(["plan", "--db", "trac.db", "--observed", "server=0"])
        .assert()
        .success();

    m.cmd()
        .args(["record", "1", "https://github.com/example/server/issues/4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "number mismatch for ticket #1: expected 1, created 4",
        ));

    assert_eq!(
        m.read("tickets_created.tsv"),
        "https://trac.example.com/ticket/1\thttps://github.com/example/server/issues/4\n"
    );
}

#[test]
fn record_twice_fails() {
    let m = Migration::new();
    m.cmd()
        .args(["record", "7", "https://github.com/example/server/issues/7"])
        .assert()
        .success();

    m.cmd()
        .args(["record", "7", "https://github.com/example/server/issues/8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already recorded"));
}

#[test]
fn render_unclosed_block_fails() {
    let m = Migration::new();
    m.ticket(1, "server", "{{{\nnever closed");

    m.cmd()
        .args(["render", "--db", "trac.db", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot translate ticket #1"));
}

#[test]
fn mismatch_blocks_render_and_record_until_replanned() {
    let m = Migration::new();
    m.ticket(1, "server", "").ticket(2, "server", "See #1");
    m.cmd()
        .args(["plan", "--db", "trac.db", "--observed", "server=0"])
        .assert()
        .success();
    m.cmd()
        .args(["record", "1", "https://github.com/example/server/issues/4"])
        .assert()
        .failure();

    m.cmd()
        .args(["render", "--db", "trac.db"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("number mismatch for ticket #1: expected 1, created 4"))
        .stderr(predicate::str::contains("trac2gh plan"));

    m.cmd()
        .args(["record", "2", "https://github.com/example/server/issues/5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number mismatch for ticket #1"));
    assert_eq!(m.read("tickets_created.tsv").lines().count(), 1);

    m.cmd()
        .args(["plan", "--db", "trac.db", "--observed", "server=4"])
        .assert()
        .success();
    m.cmd()
        .args(["render", "--db", "trac.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "See [#4](https://github.com/example/server/issues/4)",
        ));
}
