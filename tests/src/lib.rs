// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod ethernet;

pub mod utils {
    use rpicast_common::config::NetworkDefaults;
    use rpicast_common::models::profile::ConnectionProfile;
    use rpicast_core::configurator::{Configurator, RunReport};
    use rpicast_core::testing::{FakeFiles, FakeLinks, FakeProfiles, FakeRunner};

    pub const STOCK_DHCPCD: &str = "# A sample configuration for dhcpcd.\n\
                                    hostname\n\
                                    clientid\n\
                                    persistent\n\
                                    option rapid_commit\n\
                                    option domain_name_servers, domain_name, domain_search, host_name\n\
                                    require dhcp_server_identifier\n\
                                    slaac private\n";

    /// A whole host held in memory: links, tools, files and profiles.
    pub struct FakeHost {
        pub links: FakeLinks,
        pub runner: FakeRunner,
        pub files: FakeFiles,
        pub profiles: FakeProfiles,
    }

    impl FakeHost {
        /// `nmcli` installed, no profiles yet.
        pub fn managed(links: &[&str]) -> Self {
            Self {
                links: FakeLinks::named(links),
                runner: FakeRunner::default().with_tool("nmcli"),
                files: FakeFiles::default(),
                profiles: FakeProfiles::default(),
            }
        }

        /// No `nmcli`, only `/etc/dhcpcd.conf` with `contents`.
        pub fn legacy(links: &[&str], contents: &str) -> Self {
            let path = NetworkDefaults::default().legacy_config_path;
            Self {
                links: FakeLinks::named(links),
                runner: FakeRunner::default(),
                files: FakeFiles::default().with_file(&path, contents),
                profiles: FakeProfiles::default(),
            }
        }

        /// Neither backend present.
        pub fn bare(links: &[&str]) -> Self {
            Self {
                links: FakeLinks::named(links),
                runner: FakeRunner::default(),
                files: FakeFiles::default(),
                profiles: FakeProfiles::default(),
            }
        }

        pub fn with_profile(mut self, profile: ConnectionProfile, active: bool) -> Self {
            let name = profile.name.clone();
            self.profiles = self.profiles.with_profile(profile);
            if active {
                self.profiles = self.profiles.with_active(&name);
            }
            self
        }

        pub fn failing(mut self, program: &str) -> Self {
            self.runner = self.runner.failing(program);
            self
        }

        pub fn run(&self, arg: Option<&str>) -> anyhow::Result<RunReport> {
            Configurator::new(
                &self.links,
                &self.runner,
                &self.files,
                &self.profiles,
                NetworkDefaults::default(),
            )
            .run(arg)
        }

        pub fn dhcpcd_conf(&self) -> Option<String> {
            self.files
                .contents(&NetworkDefaults::default().legacy_config_path)
        }

        /// Nothing was written, created, modified or cycled.
        pub fn is_untouched(&self) -> bool {
            self.profiles.mutations().is_empty()
                && self.files.writes().is_empty()
                && self.runner.calls().is_empty()
        }
    }
}
