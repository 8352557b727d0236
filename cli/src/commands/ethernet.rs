// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use is_root::is_root;

use rpicast_common::config::NetworkDefaults;
use rpicast_common::warn;
use rpicast_core::backend::nmcli::Nmcli;
use rpicast_core::configurator::Configurator;
use rpicast_core::system::{HostFiles, ShellRunner, SystemRepo};

use crate::commands::SetupEthernetArgs;
use crate::terminal::print;

pub fn setup_ethernet(args: &SetupEthernetArgs) -> anyhow::Result<()> {
    let defaults = NetworkDefaults::default();

    if !is_root() {
        warn!("Not running as root, changes may be refused without polkit authorization");
    }

    let links = SystemRepo::new(&defaults.wired_prefixes);
    let runner = ShellRunner;
    let files = HostFiles;
    let profiles = Nmcli::new(&runner, &defaults.profile_manager_tool);

    let configurator = Configurator::new(&links, &runner, &files, &profiles, defaults);
    let report = configurator.run(args.address.as_deref())?;

    print::run_report(&report);
    Ok(())
}
