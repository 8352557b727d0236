// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

/// Prefix length applied to every static address.
///
/// The toolkit assumes the camera sits on a flat /16 LAN whose router lives at
/// `<o1>.<o2>.0.1`. Deployments with a different layout change this value.
pub const STATIC_PREFIX_LEN: u8 = 16;

/// Public resolver written into the wired profile.
pub const PUBLIC_DNS: &str = "8.8.8.8";

/// Route metric for the wired profile. Higher than the wireless one so the
/// default route prefers wireless.
pub const WIRED_ROUTE_METRIC: u32 = 600;

/// Route metric for the wireless profile.
pub const WIRELESS_ROUTE_METRIC: u32 = 200;

/// Label given to a profile created for the wired interface.
pub const DEFAULT_PROFILE_NAME: &str = "wired-static";

/// Name prefixes the kernel and udev hand out to wired Ethernet devices.
pub const WIRED_NAME_PREFIXES: &[&str] = &["eth", "end", "enp", "eno", "ens", "enx"];

pub const LEGACY_CONFIG_PATH: &str = "/etc/dhcpcd.conf";
pub const LEGACY_DAEMON: &str = "dhcpcd";

/// Command-line tool of the profile-manager backend.
pub const PROFILE_MANAGER_TOOL: &str = "nmcli";

/// Fixed values the ethernet configurator derives its plan from.
///
/// Nothing here is exposed as a flag. The struct exists so every assumption
/// the run makes lives in one auditable place, and so tests can swap paths.
#[derive(Debug, Clone)]
pub struct NetworkDefaults {
    /// See [`STATIC_PREFIX_LEN`].
    pub prefix_len: u8,

    pub dns: Vec<String>,

    pub wired_metric: u32,

    /// Must stay below `wired_metric`, lower metrics win default-route selection.
    pub wireless_metric: u32,

    pub profile_name: String,

    pub wired_prefixes: Vec<String>,

    /// Static configuration file of the legacy backend.
    pub legacy_config_path: PathBuf,

    /// Service restarted after the legacy file is rewritten.
    pub legacy_daemon: String,

    pub profile_manager_tool: String,
}

impl Default for NetworkDefaults {
    fn default() -> Self {
        Self {
            prefix_len: STATIC_PREFIX_LEN,
            dns: vec![PUBLIC_DNS.to_string()],
            wired_metric: WIRED_ROUTE_METRIC,
            wireless_metric: WIRELESS_ROUTE_METRIC,
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            wired_prefixes: WIRED_NAME_PREFIXES.iter().map(|p| p.to_string()).collect(),
            legacy_config_path: PathBuf::from(LEGACY_CONFIG_PATH),
            legacy_daemon: LEGACY_DAEMON.to_string(),
            profile_manager_tool: PROFILE_MANAGER_TOOL.to_string(),
        }
    }
}

impl NetworkDefaults {
    /// Dotted mask matching `prefix_len`, used only for display.
    pub fn netmask(&self) -> String {
        let bits: u32 = match self.prefix_len {
            0 => 0,
            n if n >= 32 => u32::MAX,
            n => u32::MAX << (32 - n),
        };
        std::net::Ipv4Addr::from(bits).to_string()
    }
}
