// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{Instant, sleep, timeout};

use rpicast_common::debug;

use crate::stream::pipeline::RELAY_TOOL;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);
const RETRY_INTERVAL: Duration = Duration::from_millis(200);

/// Places the relay binary is usually unpacked to, in lookup order.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        paths.push(dir.join(RELAY_TOOL));
    }
    paths.push(Path::new("/usr/local/bin").join(RELAY_TOOL));
    paths.push(Path::new("/usr/bin").join(RELAY_TOOL));
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(RELAY_TOOL).join(RELAY_TOOL));
    }
    paths
}

/// First executable candidate, falling back to a `PATH` lookup.
pub fn locate(candidates: &[PathBuf]) -> Option<PathBuf> {
    locate_in(candidates, std::env::var_os("PATH"))
}

fn locate_in(candidates: &[PathBuf], search_path: Option<OsString>) -> Option<PathBuf> {
    if let Some(found) = candidates.iter().find(|p| is_executable(p)) {
        return Some(found.clone());
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    match which::which_in(RELAY_TOOL, search_path, cwd) {
        Ok(path) => Some(path),
        Err(e) => {
            debug!("{RELAY_TOOL} not on PATH: {e}");
            None
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Polls until something accepts TCP connections on `127.0.0.1:port`.
pub async fn wait_for_port(port: u16, deadline: Duration) -> bool {
    let until = Instant::now() + deadline;

    while Instant::now() < until {
        if let Ok(Ok(_)) = timeout(CONNECT_TIMEOUT, TcpStream::connect(("127.0.0.1", port))).await {
            return true;
        }
        debug!("port {port} not open yet");
        sleep(RETRY_INTERVAL).await;
    }
    false
}
