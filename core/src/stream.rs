// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Camera Streaming
//!
//! Serves the Pi camera as an RTSP stream through a local `mediamtx` relay.

pub mod pipeline;
pub mod relay;
pub mod supervisor;

use std::path::PathBuf;

use rpicast_common::models::stream::StreamConfig;
use rpicast_common::{info, success};

pub use supervisor::{Shutdown, Startup, StreamExit, StreamSupervisor};

/// Runtime options of the streamer.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub config_path: PathBuf,
}

impl StreamOptions {
    /// `~/Desktop/stream.json`, or `./stream.json` without a home directory.
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join("Desktop"))
            .unwrap_or_default()
            .join("stream.json")
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }
}

/// Reads the config, writing the defaults first when the file is missing.
pub fn load_config(options: &StreamOptions) -> anyhow::Result<StreamConfig> {
    let (config, created) = StreamConfig::load_or_create(&options.config_path)?;
    if created {
        success!("Created default config at {}", options.config_path.display());
    } else {
        info!("Loaded config from {}", options.config_path.display());
    }
    Ok(config)
}
