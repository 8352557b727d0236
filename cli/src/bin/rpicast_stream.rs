// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # rpicast-stream
//!
//! Runs the camera stream until interrupted. Children are always torn down
//! before the process exits, whichever way the stream ended.

use std::process::ExitCode;

use rpicast_cli::commands::{StreamArgs, stream};
use rpicast_cli::terminal::logging;
use rpicast_common::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = StreamArgs::parse_args();
    logging::init_logging(args.verbosity);

    match stream::stream(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    }
}
