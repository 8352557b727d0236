// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::bail;

use rpicast_core::stream::{
    Shutdown, Startup, StreamExit, StreamOptions, StreamSupervisor, load_config,
};

use crate::commands::StreamArgs;
use crate::terminal::print;

pub async fn stream(args: &StreamArgs) -> anyhow::Result<()> {
    let mut shutdown = Shutdown::install()?;

    let options = StreamOptions::from(args);
    let config = load_config(&options)?;

    let mut supervisor = StreamSupervisor::new(config);
    if let Startup::Interrupted(_) = supervisor.start(&mut shutdown).await? {
        return Ok(());
    }
    print::stream_banner(supervisor.config(), &options.config_path);

    let exit = supervisor.supervise(&mut shutdown).await;
    supervisor.stop().await;

    exit_result(exit?)
}

/// A requested stop is success, a child dying on its own is not.
fn exit_result(exit: StreamExit) -> anyhow::Result<()> {
    match exit {
        StreamExit::Signal(_) => Ok(()),
        StreamExit::ProcessEnded(name) => bail!("{name} exited while streaming"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_result_should_accept_signals() {
        assert!(exit_result(StreamExit::Signal("SIGINT")).is_ok());
        assert!(exit_result(StreamExit::Signal("SIGTERM")).is_ok());
    }

    #[test]
    fn exit_result_should_fail_when_child_dies() {
        let err = exit_result(StreamExit::ProcessEnded("ffmpeg")).unwrap_err();
        assert_eq!(err.to_string(), "ffmpeg exited while streaming");
    }
}
