// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! In-memory hosts for offline tests.
//!
//! Every fake records the calls that would have mutated a real host, so tests
//! can assert that fatal paths left the host untouched.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};

use rpicast_common::config::NetworkDefaults;
use rpicast_common::models::link::Link;
use rpicast_common::models::profile::{ConnectionProfile, Ipv4Settings, ProfileKind};
use rpicast_common::system::{
    CommandOutput, CommandRunner, ConfigStore, LinkRepository, ProfileManager,
};

/// A fixed set of links, classified with the default wired prefixes.
pub struct FakeLinks(Vec<Link>);

impl FakeLinks {
    pub fn named(names: &[&str]) -> Self {
        let prefixes = NetworkDefaults::default().wired_prefixes;
        Self(names.iter().map(|n| Link::from_name(n, &prefixes)).collect())
    }
}

impl LinkRepository for FakeLinks {
    fn links(&self) -> anyhow::Result<Vec<Link>> {
        Ok(self.0.clone())
    }
}

/// Knows which tools exist and records every command it is asked to run.
#[derive(Default)]
pub struct FakeRunner {
    tools: HashSet<String>,
    failing: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tools.insert(tool.to_string());
        self
    }

    /// Makes every invocation of `program` exit with status 1.
    pub fn failing(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push(format!("{program} {}", args.join(" ")));

        if self.failing.contains(program) {
            return Ok(CommandOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: format!("{program} failed"),
            });
        }
        Ok(CommandOutput {
            success: true,
            code: Some(0),
            ..Default::default()
        })
    }

    fn is_available(&self, program: &str) -> bool {
        self.tools.contains(program)
    }
}

/// Files held in a map.
#[derive(Default)]
pub struct FakeFiles {
    files: RefCell<HashMap<PathBuf, String>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl FakeFiles {
    pub fn with_file(self, path: &Path, contents: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }
}

impl ConfigStore for FakeFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &Path) -> anyhow::Result<String> {
        self.contents(path)
            .ok_or_else(|| anyhow!("{} does not exist", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        self.writes.borrow_mut().push(path.to_path_buf());
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Profile store behaving like `nmcli` for the operations the configurator uses.
#[derive(Default)]
pub struct FakeProfiles {
    profiles: RefCell<Vec<ConnectionProfile>>,
    active: RefCell<HashSet<String>>,
    mutations: RefCell<Vec<String>>,
    refuse_activation: bool,
}

impl FakeProfiles {
    pub fn with_profile(self, profile: ConnectionProfile) -> Self {
        self.profiles.borrow_mut().push(profile);
        self
    }

    /// Marks a profile as currently active.
    pub fn with_active(self, name: &str) -> Self {
        self.active.borrow_mut().insert(name.to_string());
        self
    }

    /// Every `activate` call fails, as with an unplugged cable.
    pub fn refusing_activation(mut self) -> Self {
        self.refuse_activation = true;
        self
    }

    pub fn profile(&self, name: &str) -> Option<ConnectionProfile> {
        self.profiles
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .cloned()
    }

    pub fn profiles(&self) -> Vec<ConnectionProfile> {
        self.profiles.borrow().clone()
    }

    pub fn bound_to(&self, interface: &str) -> Vec<ConnectionProfile> {
        self.profiles
            .borrow()
            .iter()
            .filter(|p| p.interface.as_deref() == Some(interface))
            .cloned()
            .collect()
    }

    /// Mutating calls in order, `activate`/`deactivate` included.
    pub fn mutations(&self) -> Vec<String> {
        self.mutations.borrow().clone()
    }

    fn record(&self, call: String) {
        self.mutations.borrow_mut().push(call);
    }

    fn update(&self, name: &str, f: impl FnOnce(&mut ConnectionProfile)) -> anyhow::Result<()> {
        let mut profiles = self.profiles.borrow_mut();
        let Some(profile) = profiles.iter_mut().find(|p| p.name == name) else {
            bail!("unknown connection '{name}'");
        };
        f(profile);
        Ok(())
    }
}

impl ProfileManager for FakeProfiles {
    fn find_by_interface(&self, interface: &str) -> anyhow::Result<Option<String>> {
        Ok(self.bound_to(interface).first().map(|p| p.name.clone()))
    }

    fn find_by_kind(&self, kind: &ProfileKind) -> anyhow::Result<Option<String>> {
        Ok(self
            .profiles
            .borrow()
            .iter()
            .find(|p| &p.kind == kind)
            .map(|p| p.name.clone()))
    }

    fn create(&self, name: &str, kind: &ProfileKind, interface: &str) -> anyhow::Result<()> {
        self.record(format!("create {name} {interface}"));
        self.profiles
            .borrow_mut()
            .push(ConnectionProfile::new(name, kind.clone(), Some(interface)));
        Ok(())
    }

    fn set_ipv4(&self, name: &str, settings: &Ipv4Settings) -> anyhow::Result<()> {
        self.record(format!("ipv4 {name} {}", settings.address));
        self.update(name, |p| p.apply_ipv4(settings))
    }

    fn set_route_metric(&self, name: &str, metric: u32) -> anyhow::Result<()> {
        self.record(format!("metric {name} {metric}"));
        self.update(name, |p| p.route_metric = Some(metric))
    }

    fn activate(&self, name: &str) -> anyhow::Result<()> {
        self.record(format!("up {name}"));
        if self.refuse_activation {
            bail!("no carrier on '{name}'");
        }
        self.active.borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn deactivate(&self, name: &str) -> anyhow::Result<()> {
        self.record(format!("down {name}"));
        if !self.active.borrow_mut().remove(name) {
            bail!("'{name}' is not an active connection");
        }
        Ok(())
    }

    fn describe(&self, name: &str) -> anyhow::Result<ConnectionProfile> {
        self.profile(name)
            .ok_or_else(|| anyhow!("unknown connection '{name}'"))
    }
}
