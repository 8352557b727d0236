// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use rpicast_common::models::profile::{AddressingMode, ConnectionProfile, ProfileKind};
use rpicast_core::backend::managed::ProfileOutcome;
use rpicast_core::backend::{Applied, BackendKind};
use rpicast_core::configurator::RunReport;

use crate::utils::FakeHost;

fn profile_outcome(report: RunReport) -> ProfileOutcome {
    assert_eq!(report.backend, BackendKind::ProfileManager);
    match report.applied {
        Applied::Profile(outcome) => outcome,
        Applied::LegacyFile(_) => panic!("expected the profile-manager path"),
    }
}

fn home_wifi() -> ConnectionProfile {
    ConnectionProfile::new("Home", ProfileKind::Wireless, Some("wlan0"))
}

#[test]
fn test_fresh_host_gets_wired_static_profile() {
    let host = FakeHost::managed(&["lo", "eth0", "wlan0"]).with_profile(home_wifi(), true);

    let outcome = profile_outcome(host.run(Some("192.168.1.50")).unwrap());

    assert!(outcome.created);
    assert_eq!(outcome.profile, "wired-static");

    let wired = host.profiles.profile("wired-static").unwrap();
    assert_eq!(wired.kind, ProfileKind::Ethernet);
    assert_eq!(wired.interface.as_deref(), Some("eth0"));
    assert_eq!(wired.mode, AddressingMode::Static);
    assert_eq!(wired.address.as_deref(), Some("192.168.1.50/16"));
    assert_eq!(wired.gateway.as_deref(), Some("192.168.0.1"));
    assert_eq!(wired.dns, vec!["8.8.8.8".to_string()]);
    assert_eq!(wired.route_metric, Some(600));
}

#[test]
fn test_wireless_metric_beats_wired_metric() {
    let host = FakeHost::managed(&["eth0", "wlan0"]).with_profile(home_wifi(), true);

    let outcome = profile_outcome(host.run(Some("10.20.30.40")).unwrap());

    assert_eq!(outcome.wireless.as_deref(), Some("Home"));
    let wired = host.profiles.profile("wired-static").unwrap().route_metric.unwrap();
    let wireless = host.profiles.profile("Home").unwrap().route_metric.unwrap();
    assert_eq!((wired, wireless), (600, 200));
    assert!(wireless < wired);
}

#[test]
fn test_existing_bound_profile_is_reused() {
    let dhcp = ConnectionProfile::new("Wired connection 1", ProfileKind::Ethernet, Some("eth0"));
    let host = FakeHost::managed(&["eth0"]).with_profile(dhcp, true);

    let outcome = profile_outcome(host.run(Some("172.16.5.9")).unwrap());

    assert!(!outcome.created);
    assert_eq!(outcome.profile, "Wired connection 1");
    assert!(host.profiles.profile("wired-static").is_none());
    assert!(
        !host
            .profiles
            .mutations()
            .iter()
            .any(|m| m.starts_with("create"))
    );

    let reused = host.profiles.profile("Wired connection 1").unwrap();
    assert_eq!(reused.mode, AddressingMode::Static);
    assert_eq!(reused.gateway.as_deref(), Some("172.16.0.1"));
}

#[test]
fn test_second_run_converges_on_same_state() {
    let host = FakeHost::managed(&["eth0", "wlan0"]).with_profile(home_wifi(), true);

    let first = profile_outcome(host.run(Some("192.168.1.50")).unwrap());
    let after_first = host.profiles.profiles();
    let second = profile_outcome(host.run(Some("192.168.1.50")).unwrap());
    let after_second = host.profiles.profiles();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(after_first, after_second);
    assert_eq!(host.profiles.bound_to("eth0").len(), 1);
    assert_eq!(second.readback, host.profiles.profile("wired-static"));
}

#[test]
fn test_new_address_overwrites_previous_one() {
    let host = FakeHost::managed(&["eth0"]);

    host.run(Some("192.168.1.50")).unwrap();
    host.run(Some("10.1.2.3")).unwrap();

    let wired = host.profiles.profile("wired-static").unwrap();
    assert_eq!(wired.address.as_deref(), Some("10.1.2.3/16"));
    assert_eq!(wired.gateway.as_deref(), Some("10.1.0.1"));
    assert_eq!(host.profiles.profiles().len(), 1);
}

#[test]
fn test_missing_wireless_profile_is_not_fatal() {
    let host = FakeHost::managed(&["eth0"]);

    let outcome = profile_outcome(host.run(Some("192.168.1.50")).unwrap());

    assert_eq!(outcome.wireless, None);
    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(
        host.profiles.profile("wired-static").unwrap().route_metric,
        Some(600)
    );
}

#[test]
fn test_inactive_profile_cycle_is_skipped_not_fatal() {
    let host = FakeHost::managed(&["eth0"]);

    let outcome = profile_outcome(host.run(Some("192.168.1.50")).unwrap());

    // A freshly created profile was never up, so only the deactivation fails.
    assert!(!outcome.steps[0].is_done());
    assert!(outcome.steps[1].is_done());
}

#[test]
fn test_first_wired_interface_is_chosen() {
    let host = FakeHost::managed(&["wlan0", "enx00e04c680001", "eth0"]);

    let report = host.run(Some("192.168.1.50")).unwrap();

    assert_eq!(report.plan.interface, "enx00e04c680001");
}

#[test]
fn test_large_octets_pass_through_unchecked() {
    let host = FakeHost::managed(&["eth0"]);

    let report = host.run(Some("300.1.2.3")).unwrap();

    assert_eq!(report.plan.address_cidr(), "300.1.2.3/16");
    assert_eq!(report.plan.gateway, "300.1.0.1");
}
