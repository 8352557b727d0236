// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

pub mod backend;
pub mod configurator;
pub mod discovery;
pub mod outcome;
pub mod stream;
pub mod system;
pub mod testing;
