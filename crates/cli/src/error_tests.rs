// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    not_configured = { Error::NotConfigured("trac2gh.toml".into()), "hint:" },
    config = { Error::Config("missing owner".into()), "missing owner" },
    ticket_not_found = { Error::TicketNotFound(9), "#9" },
    already_recorded = { Error::AlreadyRecorded(3), "already recorded" },
    invalid_ledger = {
        Error::InvalidLedger { path: "l.tsv".into(), line: 4, reason: "missing tab".into() },
        "l.tsv:4: missing tab",
    },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn duplicate_mapping_maps_to_already_recorded() {
    let err: Error = trac2gh_core::Error::DuplicateMapping(5).into();
    assert!(matches!(err, Error::AlreadyRecorded(5)));
}

#[test]
fn number_mismatch_keeps_numbers() {
    let err: Error = trac2gh_core::Error::NumberMismatch {
        ticket: 5,
        expected: 5,
        actual: 7,
    }
    .into();
    assert!(matches!(
        err,
        Error::NumberMismatch {
            ticket: 5,
            expected: 5,
            actual: 7
        }
    ));
    assert!(err.to_string().contains("reconcile"));
}

#[test]
fn other_core_errors_are_transparent() {
    let err: Error = trac2gh_core::Error::UnknownRepository("server".into()).into();
    assert!(matches!(err, Error::Core(_)));
    assert!(err.to_string().starts_with("no cursor for repository 'server'"));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}
