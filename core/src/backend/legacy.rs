// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Legacy-file path (`dhcpcd.conf`).
//!
//! The file is a sequence of blocks, each opened by an `interface <name>`
//! header and running until the next header or end of file. The block of the
//! target interface is replaced, never duplicated.
//!
//! This path has no notion of per-profile route metrics, so it does not
//! prioritize wireless the way the profile-manager path does.

use std::path::PathBuf;

use anyhow::Context;

use rpicast_common::error::SetupError;
use rpicast_common::models::plan::StaticPlan;
use rpicast_common::system::{CommandRunner, ConfigStore};
use rpicast_common::{info, success, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyOutcome {
    pub path: PathBuf,
    /// Whether a block for the interface was already present.
    pub replaced: bool,
    pub daemon: String,
}

pub struct LegacyBackend<'a> {
    files: &'a dyn ConfigStore,
    runner: &'a dyn CommandRunner,
    path: PathBuf,
    daemon: String,
}

impl<'a> LegacyBackend<'a> {
    pub fn new(
        files: &'a dyn ConfigStore,
        runner: &'a dyn CommandRunner,
        path: PathBuf,
        daemon: &str,
    ) -> Self {
        Self {
            files,
            runner,
            path,
            daemon: daemon.to_string(),
        }
    }

    pub fn apply(&self, plan: &StaticPlan) -> anyhow::Result<LegacyOutcome> {
        let existing = self.files.read(&self.path)?;
        let replaced = has_block(&existing, &plan.interface);
        if replaced {
            info!(
                "Replacing existing block for {} in {}",
                plan.interface,
                self.path.display()
            );
        }

        let updated = rewrite(&existing, &plan.interface, &render_block(plan));
        self.files.write(&self.path, &updated)?;
        success!(
            "Wrote static block for {} to {}",
            plan.interface,
            self.path.display()
        );

        self.restart_daemon()?;
        success!("Restarted {}", self.daemon);

        warn!(
            "{} has no route metrics, wireless was not prioritized over {}",
            self.path.display(),
            plan.interface
        );

        Ok(LegacyOutcome {
            path: self.path.clone(),
            replaced,
            daemon: self.daemon.clone(),
        })
    }

    fn restart_daemon(&self) -> anyhow::Result<()> {
        let args = ["restart", self.daemon.as_str()];
        let output = self
            .runner
            .run("systemctl", &args)
            .with_context(|| format!("restarting {}", self.daemon))?;

        if !output.success {
            return Err(SetupError::CommandFailed {
                command: format!("systemctl {}", args.join(" ")),
                status: output
                    .code
                    .map_or_else(|| "a signal".to_string(), |c| format!("status {c}")),
                stderr: output.stderr,
            }
            .into());
        }
        Ok(())
    }
}

/// The block appended for `plan.interface`, newline terminated.
pub fn render_block(plan: &StaticPlan) -> String {
    format!(
        "interface {}\nstatic ip_address={}\nstatic routers={}\nstatic domain_name_servers={}\n",
        plan.interface,
        plan.address_cidr(),
        plan.gateway,
        plan.dns.join(" ")
    )
}

/// Drops every block headed by `interface <name>` and appends `block`.
pub fn rewrite(existing: &str, interface: &str, block: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in existing.lines() {
        if let Some(name) = header_name(line) {
            skipping = name == interface;
        }
        if !skipping {
            kept.push(line);
        }
    }

    let head = kept.join("\n");
    let head = head.trim_end();
    if head.is_empty() {
        block.to_string()
    } else {
        format!("{head}\n\n{block}")
    }
}

fn has_block(existing: &str, interface: &str) -> bool {
    existing
        .lines()
        .any(|line| header_name(line) == Some(interface))
}

/// Interface named by an `interface <name>` header line.
fn header_name(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("interface") => Some(tokens.next().unwrap_or("")),
        _ => None,
    }
}
