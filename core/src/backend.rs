// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Configuration Backends
//!
//! The host is configured through exactly one of two subsystems:
//!
//! * **Profile manager** (`nmcli`): named, interface-bound profiles with live
//!   activation. Supports route-metric arbitration between wired and wireless.
//! * **Legacy file** (`dhcpcd.conf`): a static text file plus a daemon restart.
//!
//! Detection happens once, before anything on the host is touched. The
//! selected variant is then dispatched through [`Backend`].

pub mod legacy;
pub mod managed;
pub mod nmcli;

use std::fmt;

use rpicast_common::config::NetworkDefaults;
use rpicast_common::error::SetupError;
use rpicast_common::models::plan::StaticPlan;
use rpicast_common::system::{CommandRunner, ConfigStore, ProfileManager};

use legacy::{LegacyBackend, LegacyOutcome};
use managed::{ManagedBackend, ProfileOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    ProfileManager,
    LegacyFile,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::ProfileManager => f.write_str("profile manager"),
            BackendKind::LegacyFile => f.write_str("legacy file"),
        }
    }
}

/// Checks the backends in priority order. Read-only.
pub fn detect(
    runner: &dyn CommandRunner,
    files: &dyn ConfigStore,
    defaults: &NetworkDefaults,
) -> Result<BackendKind, SetupError> {
    if runner.is_available(&defaults.profile_manager_tool) {
        return Ok(BackendKind::ProfileManager);
    }
    if files.exists(&defaults.legacy_config_path) {
        return Ok(BackendKind::LegacyFile);
    }
    Err(SetupError::NoBackend {
        tool: defaults.profile_manager_tool.clone(),
        legacy_path: defaults.legacy_config_path.clone(),
    })
}

/// What a backend did, per variant.
#[derive(Debug, Clone)]
pub enum Applied {
    Profile(ProfileOutcome),
    LegacyFile(LegacyOutcome),
}

pub enum Backend<'a> {
    ProfileManager(ManagedBackend<'a>),
    LegacyFile(LegacyBackend<'a>),
}

impl<'a> Backend<'a> {
    pub fn select(
        kind: BackendKind,
        profiles: &'a dyn ProfileManager,
        runner: &'a dyn CommandRunner,
        files: &'a dyn ConfigStore,
        defaults: &NetworkDefaults,
    ) -> Self {
        match kind {
            BackendKind::ProfileManager => Backend::ProfileManager(ManagedBackend::new(profiles)),
            BackendKind::LegacyFile => Backend::LegacyFile(LegacyBackend::new(
                files,
                runner,
                defaults.legacy_config_path.clone(),
                &defaults.legacy_daemon,
            )),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::ProfileManager(_) => BackendKind::ProfileManager,
            Backend::LegacyFile(_) => BackendKind::LegacyFile,
        }
    }

    pub fn apply(&self, plan: &StaticPlan) -> anyhow::Result<Applied> {
        match self {
            Backend::ProfileManager(backend) => backend.apply(plan).map(Applied::Profile),
            Backend::LegacyFile(backend) => backend.apply(plan).map(Applied::LegacyFile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeFiles, FakeRunner};

    #[test]
    fn detect_should_prefer_profile_manager() {
        let defaults = NetworkDefaults::default();
        let runner = FakeRunner::default().with_tool("nmcli");
        let files = FakeFiles::default().with_file(&defaults.legacy_config_path, "");

        assert_eq!(
            detect(&runner, &files, &defaults),
            Ok(BackendKind::ProfileManager)
        );
    }

    #[test]
    fn detect_should_fall_back_to_legacy_file() {
        let defaults = NetworkDefaults::default();
        let runner = FakeRunner::default();
        let files = FakeFiles::default().with_file(&defaults.legacy_config_path, "");

        assert_eq!(detect(&runner, &files, &defaults), Ok(BackendKind::LegacyFile));
    }

    #[test]
    fn detect_should_fail_without_any_backend() {
        let defaults = NetworkDefaults::default();
        let err = detect(&FakeRunner::default(), &FakeFiles::default(), &defaults).unwrap_err();
        assert!(matches!(err, SetupError::NoBackend { .. }));
    }
}
