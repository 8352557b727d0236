// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! `nmcli` driven [`ProfileManager`].
//!
//! Profiles are listed in terse mode (`-t`), where `:` separates columns and
//! literal colons or backslashes inside a value are escaped with `\`.

use rpicast_common::debug;
use rpicast_common::error::SetupError;
use rpicast_common::models::profile::{
    AddressingMode, ConnectionProfile, Ipv4Settings, ProfileKind,
};
use rpicast_common::system::{CommandRunner, ProfileManager};

const DESCRIBE_FIELDS: &str = "connection.type,connection.interface-name,ipv4.method,ipv4.addresses,ipv4.gateway,ipv4.dns,ipv4.route-metric";

pub struct Nmcli<'a> {
    runner: &'a dyn CommandRunner,
    tool: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileRow {
    name: String,
    kind: ProfileKind,
    /// Device the profile is active on, empty when inactive.
    device: Option<String>,
}

impl<'a> Nmcli<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tool: &str) -> Self {
        Self {
            runner,
            tool: tool.to_string(),
        }
    }

    /// Runs `nmcli` and returns stdout, failing on a non-zero exit.
    fn call(&self, args: &[&str]) -> anyhow::Result<String> {
        debug!("{} {}", self.tool, args.join(" "));
        let output = self.runner.run(&self.tool, args)?;

        if !output.success {
            let status = match output.code {
                Some(code) => format!("status {code}"),
                None => "a signal".to_string(),
            };
            return Err(SetupError::CommandFailed {
                command: format!("{} {}", self.tool, args.join(" ")),
                status,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(output.stdout)
    }

    fn list(&self) -> anyhow::Result<Vec<ProfileRow>> {
        let stdout = self.call(&["-t", "-f", "NAME,TYPE,DEVICE", "connection", "show"])?;
        Ok(parse_profile_rows(&stdout))
    }

    fn bound_interface(&self, name: &str) -> anyhow::Result<Option<String>> {
        let stdout = self.call(&[
            "-g",
            "connection.interface-name",
            "connection",
            "show",
            "id",
            name,
        ])?;
        Ok(non_empty(&unescape(stdout.trim())))
    }
}

impl ProfileManager for Nmcli<'_> {
    fn find_by_interface(&self, interface: &str) -> anyhow::Result<Option<String>> {
        let rows = self.list()?;

        if let Some(row) = rows
            .iter()
            .find(|row| row.device.as_deref() == Some(interface))
        {
            return Ok(Some(row.name.clone()));
        }

        // Inactive profiles only reveal their binding through interface-name.
        for row in rows.iter().filter(|row| row.device.is_none()) {
            if self.bound_interface(&row.name)?.as_deref() == Some(interface) {
                return Ok(Some(row.name.clone()));
            }
        }
        Ok(None)
    }

    fn find_by_kind(&self, kind: &ProfileKind) -> anyhow::Result<Option<String>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|row| &row.kind == kind)
            .map(|row| row.name))
    }

    fn create(&self, name: &str, kind: &ProfileKind, interface: &str) -> anyhow::Result<()> {
        self.call(&[
            "connection",
            "add",
            "type",
            kind.as_nmcli(),
            "ifname",
            interface,
            "con-name",
            name,
        ])?;
        Ok(())
    }

    fn set_ipv4(&self, name: &str, settings: &Ipv4Settings) -> anyhow::Result<()> {
        let dns = settings.dns.join(",");
        self.call(&[
            "connection",
            "modify",
            "id",
            name,
            "ipv4.addresses",
            &settings.address,
            "ipv4.gateway",
            &settings.gateway,
            "ipv4.dns",
            &dns,
            "ipv4.method",
            settings.mode.as_nmcli(),
        ])?;
        Ok(())
    }

    fn set_route_metric(&self, name: &str, metric: u32) -> anyhow::Result<()> {
        let metric = metric.to_string();
        self.call(&[
            "connection",
            "modify",
            "id",
            name,
            "ipv4.route-metric",
            &metric,
        ])?;
        Ok(())
    }

    fn activate(&self, name: &str) -> anyhow::Result<()> {
        self.call(&["connection", "up", "id", name])?;
        Ok(())
    }

    fn deactivate(&self, name: &str) -> anyhow::Result<()> {
        self.call(&["connection", "down", "id", name])?;
        Ok(())
    }

    fn describe(&self, name: &str) -> anyhow::Result<ConnectionProfile> {
        let stdout = self.call(&["-g", DESCRIBE_FIELDS, "connection", "show", "id", name])?;
        Ok(parse_description(name, &stdout))
    }
}

/// Splits one terse line into columns, resolving `\:` and `\\`.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn unescape(value: &str) -> String {
    split_terse(value).join(":")
}

fn non_empty(value: &str) -> Option<String> {
    match value.trim() {
        "" | "--" => None,
        v => Some(v.to_string()),
    }
}

fn parse_profile_rows(stdout: &str) -> Vec<ProfileRow> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = split_terse(line);
            let [name, kind, device] = fields.as_slice() else {
                return None;
            };
            Some(ProfileRow {
                name: name.clone(),
                kind: ProfileKind::from_nmcli(kind),
                device: non_empty(device),
            })
        })
        .collect()
}

/// Maps the line-per-field output of `nmcli -g DESCRIBE_FIELDS`.
fn parse_description(name: &str, stdout: &str) -> ConnectionProfile {
    let mut lines = stdout.lines().map(unescape);
    let mut next = || lines.next().unwrap_or_default();

    let kind = ProfileKind::from_nmcli(&next());
    let interface = non_empty(&next());
    let mode = AddressingMode::from_nmcli(next().trim());
    let address = non_empty(&next());
    let gateway = non_empty(&next());
    let dns = next()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    // -1 means "use the device default".
    let route_metric = next().trim().parse::<i64>().ok().and_then(|m| u32::try_from(m).ok());

    ConnectionProfile {
        name: name.to_string(),
        kind,
        interface,
        mode,
        address,
        gateway,
        dns,
        route_metric,
    }
}
