// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Target Address Model
//!
//! The static IPv4 address handed to `setup-ethernet`.
//!
//! Validation is shape-only: four runs of ASCII digits separated by dots.
//! Octets are *not* range checked, so `300.1.1.1` is accepted and passed on
//! to the backend verbatim. Existing callers rely on that, see DESIGN.md.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SetupError;

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("dotted quad pattern")
});

/// A validated, immutable target address.
///
/// Octets are kept as the digit strings the operator typed, so derived values
/// (gateway, CIDR) echo the input exactly, leading zeros included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAddress {
    octets: [String; 4],
}

impl TargetAddress {
    /// Validates the raw command-line argument.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, SetupError> {
        match arg {
            None => Err(SetupError::MissingAddress),
            Some(raw) => raw.parse(),
        }
    }

    /// Router of the assumed /16: the first two octets followed by `.0.1`.
    pub fn gateway(&self) -> String {
        format!("{}.{}.0.1", self.octets[0], self.octets[1])
    }

    /// The address in `a.b.c.d/prefix` notation.
    pub fn with_prefix(&self, prefix_len: u8) -> String {
        format!("{self}/{prefix_len}")
    }
}

impl FromStr for TargetAddress {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = DOTTED_QUAD
            .captures(s)
            .ok_or_else(|| SetupError::InvalidAddress(s.to_string()))?;

        let octets = [1, 2, 3, 4].map(|i| caps[i].to_string());
        Ok(Self { octets })
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.octets.join("."))
    }
}
