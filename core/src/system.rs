// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Real host implementations of the capability traits in
//! `rpicast_common::system`.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::Context;
use pnet::datalink::{self, NetworkInterface};

use rpicast_common::models::link::{Link, LinkKind};
use rpicast_common::system::{CommandOutput, CommandRunner, ConfigStore, LinkRepository};

/// Enumerates links through `pnet` and classifies them by name.
pub struct SystemRepo {
    wired_prefixes: Vec<String>,
}

impl SystemRepo {
    pub fn new(wired_prefixes: &[String]) -> Self {
        Self {
            wired_prefixes: wired_prefixes.to_vec(),
        }
    }

    fn to_link(&self, interface: &NetworkInterface) -> Link {
        let mut link = Link::from_name(&interface.name, &self.wired_prefixes);
        if is_wireless(interface) {
            link.kind = LinkKind::Wireless;
        }
        link
    }
}

impl LinkRepository for SystemRepo {
    fn links(&self) -> anyhow::Result<Vec<Link>> {
        Ok(datalink::interfaces()
            .iter()
            .filter(|i| !i.is_loopback())
            .map(|i| self.to_link(i))
            .collect())
    }
}

#[cfg(target_os = "linux")]
fn is_wireless(interface: &NetworkInterface) -> bool {
    Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
}

#[cfg(not(target_os = "linux"))]
fn is_wireless(_interface: &NetworkInterface) -> bool {
    false
}

/// Runs tools through `std::process::Command`, blocking until they exit.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawning {program}"))?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Plain filesystem access.
pub struct HostFiles;

impl ConfigStore for HostFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_runner_should_capture_exit_status() {
        let runner = ShellRunner;

        let ok = runner.run("sh", &["-c", "echo hello"]).unwrap();
        assert!(ok.success);
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = runner.run("sh", &["-c", "echo oops >&2; exit 3"]).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.stderr, "oops");
    }

    #[test]
    fn shell_runner_should_report_missing_program() {
        let runner = ShellRunner;
        assert!(runner.is_available("sh"));
        assert!(!runner.is_available("rpicast-no-such-tool"));
        assert!(runner.run("rpicast-no-such-tool", &[]).is_err());
    }

    #[test]
    fn host_files_should_round_trip_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dhcpcd.conf");
        let files = HostFiles;

        assert!(!files.exists(&path));
        files.write(&path, "hostname\n").unwrap();
        assert!(files.exists(&path));
        assert_eq!(files.read(&path).unwrap(), "hostname\n");
    }
}
