// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Host Capabilities
//!
//! Contracts for everything the configurator reads from or writes to the
//! host. The real implementations live in `rpicast-core`; tests substitute
//! in-memory ones.

use std::path::Path;

use crate::models::link::Link;
use crate::models::profile::{ConnectionProfile, Ipv4Settings, ProfileKind};

/// Enumerates the network links known to the kernel.
pub trait LinkRepository {
    fn links(&self) -> anyhow::Result<Vec<Link>>;
}

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools to completion.
pub trait CommandRunner {
    /// Runs `program` and waits for it. Only a failure to spawn is an `Err`;
    /// a non-zero exit is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<CommandOutput>;

    /// Whether `program` can be spawned at all.
    fn is_available(&self, program: &str) -> bool;
}

/// Line-oriented configuration files owned by the host.
pub trait ConfigStore {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> anyhow::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()>;
}

/// Query, create, modify and (de)activate named connection profiles.
///
/// Mutating calls return `Err` when the backend rejects them.
pub trait ProfileManager {
    /// Name of the profile bound to `interface`, if any.
    fn find_by_interface(&self, interface: &str) -> anyhow::Result<Option<String>>;

    /// Name of the first profile of the given type, regardless of interface.
    fn find_by_kind(&self, kind: &ProfileKind) -> anyhow::Result<Option<String>>;

    fn create(&self, name: &str, kind: &ProfileKind, interface: &str) -> anyhow::Result<()>;

    fn set_ipv4(&self, name: &str, settings: &Ipv4Settings) -> anyhow::Result<()>;

    fn set_route_metric(&self, name: &str, metric: u32) -> anyhow::Result<()>;

    fn activate(&self, name: &str) -> anyhow::Result<()>;

    fn deactivate(&self, name: &str) -> anyhow::Result<()>;

    /// Reads the profile's current fields back.
    fn describe(&self, name: &str) -> anyhow::Result<ConnectionProfile>;
}
