// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! Argument schemas of both binaries. Execution lives in the submodules.
//!
//! `setup-ethernet` takes its address as an optional positional:
//! a missing address has to surface as the configurator's own diagnostic
//! rather than clap's usage error, so the caller sees one consistent message.

pub mod ethernet;
pub mod stream;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use rpicast_core::stream::StreamOptions;

#[derive(Parser)]
#[command(name = "setup-ethernet")]
#[command(about = "Pin a static IPv4 address on the wired interface, keeping Wi-Fi as the default route.")]
pub struct SetupEthernetArgs {
    /// Address to assign, e.g. 192.168.1.50 (mask 255.255.0.0, gateway <a>.<b>.0.1)
    #[arg(value_name = "ADDRESS")]
    pub address: Option<String>,
}

impl SetupEthernetArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Parser)]
#[command(name = "rpicast-stream")]
#[command(about = "Serve the Pi camera as an RTSP stream through mediamtx.")]
pub struct StreamArgs {
    /// Stream config file (created with defaults if missing)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase logging detail (-v: debug logs, -vv: every crate)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl StreamArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&StreamArgs> for StreamOptions {
    fn from(args: &StreamArgs) -> Self {
        match &args.config {
            Some(path) => Self {
                config_path: path.clone(),
            },
            None => Self::default(),
        }
    }
}
