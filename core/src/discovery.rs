// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rpicast_common::error::SetupError;
use rpicast_common::models::link::{Link, is_wired_name};
use rpicast_common::system::LinkRepository;
use rpicast_common::{debug, info};

/// Picks the first link whose name follows a wired naming convention.
///
/// Only the first match is used, even if the host has several wired ports.
pub fn find_wired_interface(
    repo: &dyn LinkRepository,
    wired_prefixes: &[String],
) -> anyhow::Result<Link> {
    let links = repo.links()?;

    let unit = if links.len() == 1 { "link" } else { "links" };
    info!("Found {} network {unit}", links.len());
    for link in &links {
        debug!("{} ({})", link.name, link.kind);
    }

    let wired = links
        .into_iter()
        .find(|link| is_wired_name(&link.name, wired_prefixes))
        .ok_or_else(|| SetupError::NoWiredInterface(wired_prefixes.join(", ")))?;

    Ok(wired)
}
