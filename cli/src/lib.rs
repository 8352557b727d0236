// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Shared command-line layer of the `setup-ethernet` and `rpicast-stream`
//! binaries: argument schemas, command bodies and terminal output.

pub mod commands;
pub mod terminal;
