// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # setup-ethernet
//!
//! Assigns a static address to the wired interface in one pass and exits.
//! Every error reaching this boundary is logged as a single line and turned
//! into a non-zero exit code.

use std::process::ExitCode;

use rpicast_cli::commands::{SetupEthernetArgs, ethernet};
use rpicast_cli::terminal::logging;
use rpicast_common::error;

fn main() -> ExitCode {
    let args = SetupEthernetArgs::parse_args();
    logging::init_logging(0);

    match ethernet::setup_ethernet(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    }
}
