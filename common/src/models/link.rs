// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Wired,
    Wireless,
    Other,
}

/// A network device as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub kind: LinkKind,
}

impl Link {
    /// Classifies a device purely by its platform-assigned name.
    pub fn from_name<S: AsRef<str>>(name: &str, wired_prefixes: &[S]) -> Self {
        let kind = if is_wired_name(name, wired_prefixes) {
            LinkKind::Wired
        } else if name.starts_with("wl") {
            LinkKind::Wireless
        } else {
            LinkKind::Other
        };

        Self {
            name: name.to_string(),
            kind,
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkKind::Wired => "wired",
            LinkKind::Wireless => "wireless",
            LinkKind::Other => "other",
        };
        f.write_str(s)
    }
}

pub fn is_wired_name<S: AsRef<str>>(name: &str, wired_prefixes: &[S]) -> bool {
    wired_prefixes
        .iter()
        .any(|prefix| name.starts_with(prefix.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WIRED_NAME_PREFIXES;

    #[test]
    fn from_name_should_classify_common_devices() {
        for wired in ["eth0", "end0", "enp3s0", "eno1", "ens33", "enx001122334455"] {
            assert_eq!(
                Link::from_name(wired, WIRED_NAME_PREFIXES).kind,
                LinkKind::Wired,
                "{wired} should be wired"
            );
        }

        assert_eq!(
            Link::from_name("wlan0", WIRED_NAME_PREFIXES).kind,
            LinkKind::Wireless
        );
        assert_eq!(
            Link::from_name("wlp2s0", WIRED_NAME_PREFIXES).kind,
            LinkKind::Wireless
        );
        assert_eq!(Link::from_name("lo", WIRED_NAME_PREFIXES).kind, LinkKind::Other);
        assert_eq!(
            Link::from_name("docker0", WIRED_NAME_PREFIXES).kind,
            LinkKind::Other
        );
    }
}
