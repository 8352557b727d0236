// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Command lines of the external processes.
//!
//! The camera tool emits a raw H.264 elementary stream on stdout with SPS/PPS
//! repeated on every IDR frame, and `ffmpeg` repackages it into RTSP without
//! re-encoding. Both are plain argument vectors here so they can be tested
//! without spawning anything.

use rpicast_common::error::StreamError;
use rpicast_common::models::stream::StreamConfig;

pub const CAMERA_TOOL: &str = "rpicam-vid";
pub const REMUX_TOOL: &str = "ffmpeg";
pub const RELAY_TOOL: &str = "mediamtx";

/// Frames between two IDR frames.
const IDR_INTERVAL: u32 = 15;

pub fn camera_args(config: &StreamConfig) -> Result<Vec<String>, StreamError> {
    let (width, height) = config.dimensions()?;

    let width = width.to_string();
    let height = height.to_string();
    let fps = config.fps.to_string();
    let intra = IDR_INTERVAL.to_string();

    #[rustfmt::skip]
    let args: &[&str] = &[
        "-t", "0", // run until killed
        "-n", // no preview window
        "--width", &width,
        "--height", &height,
        "--framerate", &fps,
        "--codec", "h264",
        "--libav-format", "h264",
        "--profile", "baseline",
        "--level", "4.1",
        "--intra", &intra,
        "--inline",
        "-o", "-",
    ];
    Ok(args.iter().map(|s| s.to_string()).collect())
}

pub fn remux_args(config: &StreamConfig) -> Vec<String> {
    let target = config.publish_url();
    #[rustfmt::skip]
    let args: &[&str] = &[
        "-hide_banner",
        "-loglevel", "warning",
        "-f", "h264",
        "-i", "-",
        "-c:v", "copy",
        "-f", "rtsp",
        "-rtsp_transport", "tcp",
    ];
    args.iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(target))
        .collect()
}

/// Environment overrides for the relay: TCP only, listening on the config port.
pub fn relay_env(config: &StreamConfig) -> Vec<(String, String)> {
    vec![
        ("MTX_PROTOCOLS".to_string(), "tcp".to_string()),
        ("MTX_RTSPADDRESS".to_string(), format!(":{}", config.port)),
    ]
}
