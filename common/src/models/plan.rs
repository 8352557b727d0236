// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::config::NetworkDefaults;
use crate::models::address::TargetAddress;
use crate::models::profile::{AddressingMode, Ipv4Settings};

/// Every value a configurator run is going to write, computed up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPlan {
    pub interface: String,
    pub address: TargetAddress,
    pub prefix_len: u8,
    pub gateway: String,
    pub dns: Vec<String>,
    pub wired_metric: u32,
    pub wireless_metric: u32,
    /// Used only when no profile is bound to `interface` yet.
    pub profile_name: String,
}

impl StaticPlan {
    pub fn new(address: TargetAddress, interface: &str, defaults: &NetworkDefaults) -> Self {
        Self {
            interface: interface.to_string(),
            gateway: address.gateway(),
            address,
            prefix_len: defaults.prefix_len,
            dns: defaults.dns.clone(),
            wired_metric: defaults.wired_metric,
            wireless_metric: defaults.wireless_metric,
            profile_name: defaults.profile_name.clone(),
        }
    }

    pub fn address_cidr(&self) -> String {
        self.address.with_prefix(self.prefix_len)
    }

    pub fn ipv4_settings(&self) -> Ipv4Settings {
        Ipv4Settings {
            address: self.address_cidr(),
            gateway: self.gateway.clone(),
            dns: self.dns.clone(),
            mode: AddressingMode::Static,
        }
    }
}
