// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use trac2gh::Cli;

fn main() {
    let cli = Cli::parse();
    trac2gh::logging::init();
    if let Err(e) = trac2gh::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
