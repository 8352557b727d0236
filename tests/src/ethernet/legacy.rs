// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use rpicast_core::backend::legacy::LegacyOutcome;
use rpicast_core::backend::{Applied, BackendKind};
use rpicast_core::configurator::RunReport;

use crate::utils::{FakeHost, STOCK_DHCPCD};

fn legacy_outcome(report: RunReport) -> LegacyOutcome {
    assert_eq!(report.backend, BackendKind::LegacyFile);
    match report.applied {
        Applied::LegacyFile(outcome) => outcome,
        Applied::Profile(_) => panic!("expected the legacy-file path"),
    }
}

#[test]
fn test_block_is_appended_and_daemon_restarted() {
    let host = FakeHost::legacy(&["eth0", "wlan0"], STOCK_DHCPCD);

    let outcome = legacy_outcome(host.run(Some("192.168.1.50")).unwrap());

    assert!(!outcome.replaced);
    let conf = host.dhcpcd_conf().unwrap();
    assert!(conf.starts_with(STOCK_DHCPCD.trim_end()));
    assert!(conf.ends_with(
        "interface eth0\n\
         static ip_address=192.168.1.50/16\n\
         static routers=192.168.0.1\n\
         static domain_name_servers=8.8.8.8\n"
    ));
    assert_eq!(host.runner.calls(), vec!["systemctl restart dhcpcd"]);
    assert!(host.profiles.mutations().is_empty());
}

#[test]
fn test_two_runs_leave_one_block() {
    let host = FakeHost::legacy(&["eth0"], STOCK_DHCPCD);

    host.run(Some("192.168.1.50")).unwrap();
    let after_first = host.dhcpcd_conf().unwrap();
    let outcome = legacy_outcome(host.run(Some("192.168.1.50")).unwrap());
    let after_second = host.dhcpcd_conf().unwrap();

    assert!(outcome.replaced);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second.matches("interface eth0").count(), 1);
}

#[test]
fn test_other_interface_blocks_survive() {
    let existing = format!(
        "{STOCK_DHCPCD}\ninterface eth0\nstatic ip_address=10.0.0.2/16\n\n\
         interface wlan0\nenv ifwireless=1\n"
    );
    let host = FakeHost::legacy(&["eth0", "wlan0"], &existing);

    host.run(Some("10.9.8.7")).unwrap();

    let conf = host.dhcpcd_conf().unwrap();
    assert!(conf.contains("interface wlan0\nenv ifwireless=1"));
    assert!(!conf.contains("10.0.0.2"));
    assert!(conf.contains("static ip_address=10.9.8.7/16"));
}

#[test]
fn test_wireless_is_not_prioritized_on_legacy_path() {
    let host = FakeHost::legacy(&["eth0", "wlan0"], STOCK_DHCPCD);

    host.run(Some("192.168.1.50")).unwrap();

    let conf = host.dhcpcd_conf().unwrap();
    assert!(!conf.contains("metric"));
    assert!(!conf.contains("interface wlan0"));
}
