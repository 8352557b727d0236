// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Ethernet Configurator
//!
//! Pins a static address on the wired interface.
//!
//! The run is one linear flow:
//!
//! 1.  **Validate** the target address and derive the [`StaticPlan`].
//! 2.  **Discover** the wired interface.
//! 3.  **Detect** the backend.
//! 4.  **Apply** through the selected backend.
//!
//! Steps 1 to 3 only read from the host, so every fatal condition they raise
//! leaves it untouched. Step 4 mutates without any rollback.

use rpicast_common::config::NetworkDefaults;
use rpicast_common::models::address::TargetAddress;
use rpicast_common::models::plan::StaticPlan;
use rpicast_common::system::{CommandRunner, ConfigStore, LinkRepository, ProfileManager};
use rpicast_common::{info, success};

use crate::backend::{self, Applied, Backend, BackendKind};
use crate::discovery;

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub plan: StaticPlan,
    pub backend: BackendKind,
    pub applied: Applied,
}

pub struct Configurator<'a> {
    links: &'a dyn LinkRepository,
    runner: &'a dyn CommandRunner,
    files: &'a dyn ConfigStore,
    profiles: &'a dyn ProfileManager,
    defaults: NetworkDefaults,
}

impl<'a> Configurator<'a> {
    pub fn new(
        links: &'a dyn LinkRepository,
        runner: &'a dyn CommandRunner,
        files: &'a dyn ConfigStore,
        profiles: &'a dyn ProfileManager,
        defaults: NetworkDefaults,
    ) -> Self {
        Self {
            links,
            runner,
            files,
            profiles,
            defaults,
        }
    }

    /// Runs the whole flow for the raw command-line argument.
    pub fn run(&self, arg: Option<&str>) -> anyhow::Result<RunReport> {
        let address = TargetAddress::from_arg(arg)?;
        info!(
            "Target {} (gateway {}, mask {})",
            address.with_prefix(self.defaults.prefix_len),
            address.gateway(),
            self.defaults.netmask()
        );

        let link = discovery::find_wired_interface(self.links, &self.defaults.wired_prefixes)?;
        info!("Using wired interface {}", link.name);

        let kind = backend::detect(self.runner, self.files, &self.defaults)?;
        info!("Configuring through the {kind} backend");

        let plan = StaticPlan::new(address, &link.name, &self.defaults);
        let backend = Backend::select(
            kind,
            self.profiles,
            self.runner,
            self.files,
            &self.defaults,
        );
        let applied = backend.apply(&plan)?;

        success!("{} pinned to {}", plan.interface, plan.address_cidr());

        Ok(RunReport {
            plan,
            backend: backend.kind(),
            applied,
        })
    }
}
