// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Thin wrappers around `tracing`.
//!
//! Every event carries a `status` field which the terminal formatter turns
//! into a prefix symbol. Crates in this workspace log through these macros
//! instead of calling `tracing` directly.

/// Progress or decision note (`[»]`).
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        tracing::info!(status = "info", $($arg)+)
    };
}

/// A step that completed and changed something (`[+]`).
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        tracing::info!(status = "success", $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        tracing::debug!(status = "debug", $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        tracing::error!(status = "error", $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        tracing::warn!(status = "warn", $($arg)+)
    };
}

/// A best-effort step whose failure was deliberately discarded (`[~]`).
#[macro_export]
macro_rules! skipped {
    ($($arg:tt)+) => {
        tracing::warn!(status = "skipped", $($arg)+)
    };
}
