// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Error Types
//!
//! Typed failures that callers may want to match on. Everything else travels
//! as `anyhow::Error` with context attached at the call site.

use std::path::PathBuf;

use thiserror::Error;

/// Conditions that stop the ethernet configurator.
///
/// The first four are detected before the host is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no address given, usage: setup-ethernet <IPV4_ADDRESS>")]
    MissingAddress,

    #[error("'{0}' is not a dotted-decimal IPv4 address")]
    InvalidAddress(String),

    #[error("no wired interface found (looked for names starting with {0})")]
    NoWiredInterface(String),

    #[error("neither {tool} nor {} is available", .legacy_path.display())]
    NoBackend { tool: String, legacy_path: PathBuf },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Failures of the stream supervisor.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("resolution '{0}' is not of the form <width>x<height>")]
    InvalidResolution(String),

    #[error("mediamtx not found, install it first")]
    RelayNotFound,

    #[error("mediamtx did not open port {0} in time")]
    RelayNotListening(u16),

    #[error("{0} exited unexpectedly: {1}")]
    ProcessExited(&'static str, String),

    #[error("required tool `{0}` could not be started: {1}")]
    Spawn(&'static str, #[source] std::io::Error),
}
