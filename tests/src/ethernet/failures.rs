// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::path::PathBuf;

use rpicast_common::error::SetupError;

use crate::utils::{FakeHost, STOCK_DHCPCD};

fn setup_error(err: &anyhow::Error) -> SetupError {
    err.downcast_ref::<SetupError>()
        .cloned()
        .unwrap_or_else(|| panic!("expected a setup error, got: {err:#}"))
}

#[test]
fn test_missing_address_leaves_host_untouched() {
    let host = FakeHost::managed(&["eth0", "wlan0"]);

    let err = host.run(None).unwrap_err();

    assert_eq!(setup_error(&err), SetupError::MissingAddress);
    assert!(host.is_untouched());
}

#[test]
fn test_malformed_addresses_leave_host_untouched() {
    for raw in ["192.168.1", "abc", "1.2.3.4.5", "10.0.0.-1", " 10.0.0.1", ""] {
        let host = FakeHost::managed(&["eth0"]);

        let err = host.run(Some(raw)).unwrap_err();

        assert_eq!(
            setup_error(&err),
            SetupError::InvalidAddress(raw.to_string()),
            "input {raw:?}"
        );
        assert!(host.is_untouched(), "input {raw:?} touched the host");
    }
}

#[test]
fn test_no_wired_interface_leaves_host_untouched() {
    let host = FakeHost::managed(&["wlan0", "docker0", "tailscale0"]);

    let err = host.run(Some("192.168.1.50")).unwrap_err();

    assert!(matches!(setup_error(&err), SetupError::NoWiredInterface(_)));
    assert!(host.is_untouched());
}

#[test]
fn test_no_backend_leaves_host_untouched() {
    let host = FakeHost::bare(&["eth0"]);

    let err = host.run(Some("192.168.1.50")).unwrap_err();

    assert_eq!(
        setup_error(&err),
        SetupError::NoBackend {
            tool: "nmcli".to_string(),
            legacy_path: PathBuf::from("/etc/dhcpcd.conf"),
        }
    );
    assert!(host.is_untouched());
}

#[test]
fn test_address_check_runs_before_interface_check() {
    let host = FakeHost::bare(&["wlan0"]);

    let err = host.run(Some("not-an-ip")).unwrap_err();

    assert!(matches!(setup_error(&err), SetupError::InvalidAddress(_)));
}

#[test]
fn test_interface_check_runs_before_backend_check() {
    let host = FakeHost::bare(&["wlan0"]);

    let err = host.run(Some("10.0.0.2")).unwrap_err();

    assert!(matches!(setup_error(&err), SetupError::NoWiredInterface(_)));
}

#[test]
fn test_legacy_restart_failure_keeps_written_file() {
    let host = FakeHost::legacy(&["eth0"], STOCK_DHCPCD).failing("systemctl");

    let err = host.run(Some("192.168.1.50")).unwrap_err();

    assert!(matches!(setup_error(&err), SetupError::CommandFailed { .. }));
    let conf = host.dhcpcd_conf().unwrap();
    assert!(conf.contains("static ip_address=192.168.1.50/16"));
}
