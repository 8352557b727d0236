// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Connection Profile Model
//!
//! A named, interface-bound configuration entry of the profile-manager
//! backend. The configurator never deletes one; it either creates a profile
//! or overwrites the fields below in place.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    Static,
    #[default]
    Automatic,
}

impl AddressingMode {
    /// Value of `ipv4.method` understood by `nmcli`.
    pub fn as_nmcli(&self) -> &'static str {
        match self {
            AddressingMode::Static => "manual",
            AddressingMode::Automatic => "auto",
        }
    }

    pub fn from_nmcli(method: &str) -> Self {
        match method {
            "manual" => AddressingMode::Static,
            _ => AddressingMode::Automatic,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressingMode::Static => f.write_str("static"),
            AddressingMode::Automatic => f.write_str("automatic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    Ethernet,
    Wireless,
    Other(String),
}

impl ProfileKind {
    /// Maps the connection type column of `nmcli`, which prints either the
    /// setting name (`802-3-ethernet`) or its alias (`ethernet`).
    pub fn from_nmcli(kind: &str) -> Self {
        match kind {
            "802-3-ethernet" | "ethernet" => ProfileKind::Ethernet,
            "802-11-wireless" | "wifi" => ProfileKind::Wireless,
            other => ProfileKind::Other(other.to_string()),
        }
    }

    pub fn as_nmcli(&self) -> &str {
        match self {
            ProfileKind::Ethernet => "ethernet",
            ProfileKind::Wireless => "wifi",
            ProfileKind::Other(other) => other,
        }
    }
}

/// The IPv4 block written to the wired profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Settings {
    /// `a.b.c.d/prefix`
    pub address: String,
    pub gateway: String,
    pub dns: Vec<String>,
    pub mode: AddressingMode,
}

/// A profile as read back from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub name: String,
    pub kind: ProfileKind,
    pub interface: Option<String>,
    pub mode: AddressingMode,
    pub address: Option<String>,
    pub gateway: Option<String>,
    pub dns: Vec<String>,
    pub route_metric: Option<u32>,
}

impl ConnectionProfile {
    pub fn new(name: &str, kind: ProfileKind, interface: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            interface: interface.map(str::to_string),
            mode: AddressingMode::default(),
            address: None,
            gateway: None,
            dns: Vec::new(),
            route_metric: None,
        }
    }

    /// Overwrites every IPv4 field, no diffing.
    pub fn apply_ipv4(&mut self, settings: &Ipv4Settings) {
        self.mode = settings.mode;
        self.address = Some(settings.address.clone());
        self.gateway = Some(settings.gateway.clone());
        self.dns = settings.dns.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_kind_should_map_nmcli_names() {
        assert_eq!(ProfileKind::from_nmcli("802-3-ethernet"), ProfileKind::Ethernet);
        assert_eq!(ProfileKind::from_nmcli("ethernet"), ProfileKind::Ethernet);
        assert_eq!(ProfileKind::from_nmcli("802-11-wireless"), ProfileKind::Wireless);
        assert_eq!(ProfileKind::from_nmcli("wifi"), ProfileKind::Wireless);
        assert_eq!(
            ProfileKind::from_nmcli("bridge"),
            ProfileKind::Other("bridge".to_string())
        );
    }

    #[test]
    fn apply_ipv4_should_overwrite_fields() {
        let mut profile = ConnectionProfile::new("wired", ProfileKind::Ethernet, Some("eth0"));
        profile.dns = vec!["1.1.1.1".into(), "9.9.9.9".into()];

        profile.apply_ipv4(&Ipv4Settings {
            address: "10.0.0.5/16".into(),
            gateway: "10.0.0.1".into(),
            dns: vec!["8.8.8.8".into()],
            mode: AddressingMode::Static,
        });

        assert_eq!(profile.mode, AddressingMode::Static);
        assert_eq!(profile.address.as_deref(), Some("10.0.0.5/16"));
        assert_eq!(profile.gateway.as_deref(), Some("10.0.0.1"));
        assert_eq!(profile.dns, vec!["8.8.8.8".to_string()]);
    }
}
