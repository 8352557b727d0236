// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Stream Supervisor
//!
//! Owns the three child processes of a running stream:
//!
//! ```text
//! rpicam-vid --stdout--> ffmpeg --rtsp/tcp--> mediamtx <-- clients
//! ```
//!
//! Startup is ordered (relay first, then the capture pipeline) and any
//! failure tears down whatever was already started. Once running, the
//! supervisor polls the children once a second and returns as soon as one of
//! them exits or the process receives SIGINT/SIGTERM.
//!
//! The signal handlers live in [`Shutdown`], which must exist before
//! [`StreamSupervisor::start`] so that a signal during startup still tears
//! the children down.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::{interval, sleep, timeout};

use rpicast_common::error::StreamError;
use rpicast_common::models::stream::StreamConfig;
use rpicast_common::{debug, info, success, warn};

use crate::stream::pipeline::{self, CAMERA_TOOL, RELAY_TOOL, REMUX_TOOL};
use crate::stream::relay;

const RELAY_STARTUP: Duration = Duration::from_secs(10);
const CAMERA_SETTLE: Duration = Duration::from_secs(2);
const STALE_SETTLE: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const STOP_GRACE: Duration = Duration::from_secs(5);
const TAIL_LINES: usize = 20;

type Tail = Arc<Mutex<VecDeque<String>>>;

/// How [`StreamSupervisor::start`] ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    Running,
    /// A shutdown signal arrived first. Everything started so far is stopped.
    Interrupted(&'static str),
}

/// Why [`StreamSupervisor::supervise`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamExit {
    /// Operator asked to stop (signal name).
    Signal(&'static str),
    /// A child process ended on its own.
    ProcessEnded(&'static str),
}

/// SIGINT/SIGTERM delivered as named events.
///
/// Handlers are registered in [`Shutdown::install`], not on first poll.
pub struct Shutdown {
    events: mpsc::Receiver<&'static str>,
}

impl Shutdown {
    #[cfg(unix)]
    pub fn install() -> anyhow::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut interrupt =
            signal(SignalKind::interrupt()).context("installing SIGINT handler")?;
        let mut terminate =
            signal(SignalKind::terminate()).context("installing SIGTERM handler")?;

        let (tx, events) = mpsc::channel(1);
        tokio::spawn(async move {
            loop {
                let name = tokio::select! {
                    Some(()) = interrupt.recv() => "SIGINT",
                    Some(()) = terminate.recv() => "SIGTERM",
                    else => break,
                };
                if tx.send(name).await.is_err() {
                    break;
                }
            }
        });
        Ok(Self { events })
    }

    #[cfg(not(unix))]
    pub fn install() -> anyhow::Result<Self> {
        let (tx, events) = mpsc::channel(1);
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send("Ctrl-C").await.is_err() {
                    break;
                }
            }
        });
        Ok(Self { events })
    }

    /// A shutdown fed by hand instead of by signals.
    pub fn channel() -> (mpsc::Sender<&'static str>, Self) {
        let (tx, events) = mpsc::channel(1);
        (tx, Self { events })
    }

    /// Next shutdown request. Never resolves once every sender is gone.
    async fn recv(&mut self) -> &'static str {
        match self.events.recv().await {
            Some(name) => name,
            None => std::future::pending().await,
        }
    }
}

struct Supervised {
    name: &'static str,
    child: Child,
    tail: Tail,
}

impl Supervised {
    fn new(name: &'static str, mut child: Child) -> Self {
        let tail: Tail = Arc::new(Mutex::new(VecDeque::with_capacity(TAIL_LINES)));
        if let Some(stdout) = child.stdout.take() {
            drain(name, stdout, Arc::clone(&tail));
        }
        if let Some(stderr) = child.stderr.take() {
            drain(name, stderr, Arc::clone(&tail));
        }
        Self { name, child, tail }
    }

    fn has_exited(&mut self) -> anyhow::Result<bool> {
        Ok(self
            .child
            .try_wait()
            .with_context(|| format!("polling {}", self.name))?
            .is_some())
    }

    fn last_output(&self) -> String {
        self.tail
            .lock()
            .map(|lines| lines.iter().cloned().collect::<Vec<_>>().join("\n"))
            .unwrap_or_default()
    }

    /// SIGTERM, then SIGKILL if the child is still around after the grace period.
    async fn terminate(&mut self) {
        if matches!(self.child.try_wait(), Ok(Some(_))) {
            return;
        }

        if let Some(pid) = self.child.id() {
            let _ = Command::new("kill")
                .args(["-TERM", &pid.to_string()])
                .status()
                .await;
        }

        if timeout(STOP_GRACE, self.child.wait()).await.is_err() {
            warn!("{} ignored SIGTERM, killing it", self.name);
            let _ = self.child.kill().await;
        }
        debug!("{} stopped", self.name);
    }
}

/// Forwards a child's output to the debug log and keeps the last lines.
fn drain<R>(name: &'static str, reader: R, tail: Tail)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!("{name}: {line}");
            if let Ok(mut buf) = tail.lock() {
                if buf.len() == TAIL_LINES {
                    buf.pop_front();
                }
                buf.push_back(line);
            }
        }
    });
}

pub struct StreamSupervisor {
    config: StreamConfig,
    relay_paths: Vec<PathBuf>,
    relay_startup: Duration,
    relay: Option<Supervised>,
    camera: Option<Supervised>,
    remux: Option<Supervised>,
}

impl StreamSupervisor {
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            relay_paths: relay::search_paths(),
            relay_startup: RELAY_STARTUP,
            relay: None,
            camera: None,
            remux: None,
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Brings the whole pipeline up unless `shutdown` fires first.
    /// On error or interruption nothing is left running.
    pub async fn start(&mut self, shutdown: &mut Shutdown) -> anyhow::Result<Startup> {
        let raced = tokio::select! {
            started = self.bring_up() => Ok(started),
            signal = shutdown.recv() => Err(signal),
        };

        match raced {
            Ok(Ok(())) => Ok(Startup::Running),
            Ok(Err(e)) => {
                self.stop().await;
                Err(e)
            }
            Err(signal) => {
                info!("Received {signal} during startup");
                self.stop().await;
                Ok(Startup::Interrupted(signal))
            }
        }
    }

    async fn bring_up(&mut self) -> anyhow::Result<()> {
        clear_stale_processes().await;
        self.start_relay().await?;
        self.start_pipeline().await
    }

    async fn start_relay(&mut self) -> anyhow::Result<()> {
        let binary = relay::locate(&self.relay_paths).ok_or(StreamError::RelayNotFound)?;
        info!(
            "Starting {RELAY_TOOL} ({}) on port {}",
            binary.display(),
            self.config.port
        );

        let child = Command::new(&binary)
            .envs(pipeline::relay_env(&self.config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StreamError::Spawn(RELAY_TOOL, e))?;
        self.relay = Some(Supervised::new(RELAY_TOOL, child));

        if !relay::wait_for_port(self.config.port, self.relay_startup).await {
            return Err(StreamError::RelayNotListening(self.config.port).into());
        }
        success!("{RELAY_TOOL} is listening");
        Ok(())
    }

    async fn start_pipeline(&mut self) -> anyhow::Result<()> {
        let camera_args = pipeline::camera_args(&self.config)?;
        info!(
            "Starting camera stream: {} @ {}fps",
            self.config.resolution, self.config.fps
        );
        info!("Publishing to {}", self.config.publish_url());

        let mut camera = Command::new(CAMERA_TOOL)
            .args(&camera_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StreamError::Spawn(CAMERA_TOOL, e))?;

        let frames: Stdio = camera
            .stdout
            .take()
            .context("camera output was not captured")?
            .try_into()
            .context("handing camera output to ffmpeg")?;
        self.camera = Some(Supervised::new(CAMERA_TOOL, camera));

        let remux = Command::new(REMUX_TOOL)
            .args(pipeline::remux_args(&self.config))
            .stdin(frames)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StreamError::Spawn(REMUX_TOOL, e))?;
        self.remux = Some(Supervised::new(REMUX_TOOL, remux));

        sleep(CAMERA_SETTLE).await;

        if let Some(camera) = self.camera.as_mut()
            && camera.has_exited()?
        {
            return Err(StreamError::ProcessExited(CAMERA_TOOL, camera.last_output()).into());
        }

        success!("Stream started");
        Ok(())
    }

    /// Waits until a child exits or a shutdown signal arrives.
    pub async fn supervise(&mut self, shutdown: &mut Shutdown) -> anyhow::Result<StreamExit> {
        let mut ticker = interval(POLL_INTERVAL);

        loop {
            tokio::select! {
                signal = shutdown.recv() => {
                    info!("Received {signal}");
                    return Ok(StreamExit::Signal(signal));
                }
                _ = ticker.tick() => {
                    if let Some(name) = self.first_exited()? {
                        warn!("{name} process ended unexpectedly");
                        return Ok(StreamExit::ProcessEnded(name));
                    }
                }
            }
        }
    }

    fn first_exited(&mut self) -> anyhow::Result<Option<&'static str>> {
        for supervised in [&mut self.remux, &mut self.camera, &mut self.relay]
            .into_iter()
            .flatten()
        {
            if supervised.has_exited()? {
                let output = supervised.last_output();
                if !output.is_empty() {
                    debug!("last output of {}:\n{output}", supervised.name);
                }
                return Ok(Some(supervised.name));
            }
        }
        Ok(None)
    }

    /// Stops every child, downstream first.
    pub async fn stop(&mut self) {
        info!("Stopping stream...");
        for slot in [&mut self.remux, &mut self.camera, &mut self.relay] {
            if let Some(mut supervised) = slot.take() {
                supervised.terminate().await;
            }
        }
        success!("Stream stopped");
    }
}

/// Kills leftovers of a previous run. Failures are irrelevant here.
async fn clear_stale_processes() {
    for name in [RELAY_TOOL, CAMERA_TOOL] {
        let status = Command::new("pkill")
            .args(["-f", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        if let Ok(status) = status
            && status.success()
        {
            debug!("killed stale {name}");
        }
    }
    sleep(STALE_SETTLE).await;
}
