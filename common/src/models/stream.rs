// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Stream Configuration
//!
//! Parameters of the camera stream, persisted as pretty-printed JSON.
//! A missing file is created with the defaults on first load.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::StreamError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// `<width>x<height>`
    pub resolution: String,
    pub fps: u32,
    /// Host advertised in the RTSP URL.
    pub hostname: String,
    pub port: u16,
    pub path: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            resolution: "1280x720".to_string(),
            fps: 30,
            hostname: "0.0.0.0".to_string(),
            port: 8554,
            path: "stream".to_string(),
        }
    }
}

impl StreamConfig {
    /// Loads the config at `path`, writing the defaults there first if the
    /// file does not exist. The flag is `true` when the file was created.
    pub fn load_or_create(path: &Path) -> anyhow::Result<(Self, bool)> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok((config, true));
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading stream config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing stream config {}", path.display()))?;
        config.dimensions()?;

        Ok((config, false))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Width and height parsed from `resolution`.
    pub fn dimensions(&self) -> Result<(u32, u32), StreamError> {
        let invalid = || StreamError::InvalidResolution(self.resolution.clone());

        let (width, height) = self.resolution.split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.parse().map_err(|_| invalid())?;
        let height: u32 = height.parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok((width, height))
    }

    /// URL clients should open. A wildcard hostname is shown as `<pi-ip>`.
    pub fn rtsp_url(&self) -> String {
        let host = match self.hostname.as_str() {
            "" | "0.0.0.0" | "::" => "<pi-ip>",
            named => named,
        };
        format!("rtsp://{host}:{}/{}", self.port, self.path)
    }

    /// URL the capture pipeline publishes to on the local relay.
    pub fn publish_url(&self) -> String {
        format!("rtsp://127.0.0.1:{}/{}", self.port, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_create_should_write_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Desktop").join("stream.json");

        let (config, created) = StreamConfig::load_or_create(&path).unwrap();
        assert!(created);
        assert_eq!(config, StreamConfig::default());
        assert!(path.exists(), "defaults should be persisted");

        let (reloaded, created) = StreamConfig::load_or_create(&path).unwrap();
        assert!(!created);
        assert_eq!(reloaded, config);
    }

    #[test]
    fn load_or_create_should_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        fs::write(&path, r#"{ "resolution": "1920x1080", "fps": 25 }"#).unwrap();

        let (config, _) = StreamConfig::load_or_create(&path).unwrap();
        assert_eq!(config.dimensions().unwrap(), (1920, 1080));
        assert_eq!(config.fps, 25);
        assert_eq!(config.port, 8554);
        assert_eq!(config.path, "stream");
    }

    #[test]
    fn load_or_create_should_reject_bad_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        fs::write(&path, r#"{ "resolution": "1080p" }"#).unwrap();

        assert!(StreamConfig::load_or_create(&path).is_err());
    }

    #[test]
    fn load_or_create_should_reject_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        fs::write(&path, "{ resolution: ").unwrap();

        assert!(StreamConfig::load_or_create(&path).is_err());
    }

    #[test]
    fn urls_should_use_port_and_path() {
        let config = StreamConfig {
            hostname: "camera.local".into(),
            port: 9000,
            path: "cam0".into(),
            ..Default::default()
        };
        assert_eq!(config.rtsp_url(), "rtsp://camera.local:9000/cam0");
        assert_eq!(config.publish_url(), "rtsp://127.0.0.1:9000/cam0");
    }

    #[test]
    fn rtsp_url_should_not_advertise_wildcard_host() {
        let config = StreamConfig::default();
        assert_eq!(config.rtsp_url(), "rtsp://<pi-ip>:8554/stream");
        assert_eq!(config.publish_url(), "rtsp://127.0.0.1:8554/stream");
    }

    #[test]
    fn dimensions_should_reject_zero_and_garbage() {
        for bad in ["0x720", "1280x", "x720", "1280*720", "axb"] {
            let config = StreamConfig {
                resolution: bad.into(),
                ..Default::default()
            };
            assert!(config.dimensions().is_err(), "{bad} should be rejected");
        }
    }
}
