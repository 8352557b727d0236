// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Profile-manager path.
//!
//! Reconciles the profile bound to the wired interface, writes the static
//! IPv4 block, then arbitrates route metrics so the default route prefers
//! wireless. Field writes overwrite unconditionally, which makes repeated
//! runs converge on the same profile state.

use anyhow::Context;

use rpicast_common::models::plan::StaticPlan;
use rpicast_common::models::profile::{ConnectionProfile, ProfileKind};
use rpicast_common::system::ProfileManager;
use rpicast_common::{info, success};

use crate::outcome::{StepRecord, best_effort};

#[derive(Debug, Clone)]
pub struct ProfileOutcome {
    pub profile: String,
    /// `true` when no profile was bound to the interface before the run.
    pub created: bool,
    pub wireless: Option<String>,
    pub steps: Vec<StepRecord>,
    /// Fields read back after the run, `None` if the read failed.
    pub readback: Option<ConnectionProfile>,
}

pub struct ManagedBackend<'a> {
    manager: &'a dyn ProfileManager,
}

impl<'a> ManagedBackend<'a> {
    pub fn new(manager: &'a dyn ProfileManager) -> Self {
        Self { manager }
    }

    pub fn apply(&self, plan: &StaticPlan) -> anyhow::Result<ProfileOutcome> {
        let (profile, created) = self.reconcile_profile(plan)?;

        self.manager
            .set_ipv4(&profile, &plan.ipv4_settings())
            .with_context(|| format!("writing static IPv4 settings to '{profile}'"))?;
        success!(
            "Set '{profile}' to {} via {} (DNS {})",
            plan.address_cidr(),
            plan.gateway,
            plan.dns.join(", ")
        );

        self.manager
            .set_route_metric(&profile, plan.wired_metric)
            .with_context(|| format!("setting route metric of '{profile}'"))?;
        success!("Route metric of '{profile}' set to {}", plan.wired_metric);

        let wireless = self.prioritize_wireless(plan)?;

        let mut steps = self.cycle(&profile);
        if let Some(wireless) = &wireless {
            steps.extend(self.cycle(wireless));
        }

        let readback = match self.manager.describe(&profile) {
            Ok(p) => Some(p),
            Err(e) => {
                best_effort(format!("read back '{profile}'"), Err(e));
                None
            }
        };

        Ok(ProfileOutcome {
            profile,
            created,
            wireless,
            steps,
            readback,
        })
    }

    /// Finds the profile bound to the interface or creates one.
    fn reconcile_profile(&self, plan: &StaticPlan) -> anyhow::Result<(String, bool)> {
        let existing = self
            .manager
            .find_by_interface(&plan.interface)
            .with_context(|| format!("looking up profile for {}", plan.interface))?;

        match existing {
            Some(name) => {
                info!("Reusing profile '{name}' bound to {}", plan.interface);
                Ok((name, false))
            }
            None => {
                info!(
                    "No profile bound to {}, creating '{}'",
                    plan.interface, plan.profile_name
                );
                self.manager
                    .create(&plan.profile_name, &ProfileKind::Ethernet, &plan.interface)
                    .with_context(|| format!("creating profile '{}'", plan.profile_name))?;
                success!("Created profile '{}'", plan.profile_name);
                Ok((plan.profile_name.clone(), true))
            }
        }
    }

    /// Lowers the metric of the first wireless profile, if the host has one.
    fn prioritize_wireless(&self, plan: &StaticPlan) -> anyhow::Result<Option<String>> {
        let Some(wireless) = self
            .manager
            .find_by_kind(&ProfileKind::Wireless)
            .context("looking up wireless profile")?
        else {
            info!("No wireless profile found, leaving default route to the wired link");
            return Ok(None);
        };

        self.manager
            .set_route_metric(&wireless, plan.wireless_metric)
            .with_context(|| format!("setting route metric of '{wireless}'"))?;
        success!(
            "Route metric of '{wireless}' set to {}, internet traffic prefers wireless",
            plan.wireless_metric
        );
        Ok(Some(wireless))
    }

    /// Down then up. Both halves are best-effort: the profile may not have
    /// been active, and a flaky link must not undo what was already written.
    fn cycle(&self, profile: &str) -> Vec<StepRecord> {
        vec![
            best_effort(
                format!("deactivate '{profile}'"),
                self.manager.deactivate(profile),
            ),
            best_effort(
                format!("activate '{profile}'"),
                self.manager.activate(profile),
            ),
        ]
    }
}
