// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::fmt::Display;
use std::path::Path;

use colored::*;

use rpicast_common::models::profile::ConnectionProfile;
use rpicast_common::models::stream::StreamConfig;
use rpicast_core::backend::legacy::LegacyOutcome;
use rpicast_core::backend::managed::ProfileOutcome;
use rpicast_core::backend::Applied;
use rpicast_core::configurator::RunReport;
use rpicast_core::outcome::{StepOutcome, StepRecord};

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 12;

type Detail = (String, ColoredString);

#[macro_export]
macro_rules! rprint {
    () => {
        $crate::rprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "rpicast::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    rprint!("{}", line);
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    rprint!("{}", sep);
}

pub fn aligned_line<V>(key: &str, value: V)
where
    V: Display + WithDefaultColor,
{
    let whitespace: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        whitespace.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    rprint!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    );
}

pub fn as_tree(details: Vec<Detail>) {
    let padding_width: usize = details.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        rprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

/// Summary printed after a successful `setup-ethernet` run.
pub fn run_report(report: &RunReport) {
    let plan = &report.plan;

    header("ethernet configured");
    aligned_line("Backend", report.backend.to_string());
    aligned_line("Interface", plan.interface.as_str().color(colors::IFACE));
    aligned_line("Address", plan.address_cidr().color(colors::IPV4_ADDR));
    aligned_line("Gateway", plan.gateway.as_str().color(colors::IPV4_ADDR));
    aligned_line("DNS", plan.dns.join(", "));

    match &report.applied {
        Applied::Profile(outcome) => profile_report(outcome, plan.wired_metric, plan.wireless_metric),
        Applied::LegacyFile(outcome) => legacy_report(outcome),
    }
    divider();
}

fn profile_report(outcome: &ProfileOutcome, wired_metric: u32, wireless_metric: u32) {
    let origin = if outcome.created { "created" } else { "reused" };
    aligned_line(
        "Profile",
        format!("{} ({origin})", outcome.profile.color(colors::SECONDARY)),
    );
    aligned_line("Wired metric", wired_metric.to_string());

    match &outcome.wireless {
        Some(name) => aligned_line(
            "Wireless",
            format!("{} (metric {wireless_metric})", name.color(colors::SECONDARY)),
        ),
        None => aligned_line("Wireless", "no profile found".color(colors::SKIPPED)),
    }

    if !outcome.steps.is_empty() {
        print_status("Activation");
        as_tree(outcome.steps.iter().map(step_detail).collect());
    }

    match &outcome.readback {
        Some(profile) => {
            print_status(format!("Read back '{}'", profile.name));
            as_tree(readback_details(profile));
        }
        None => print_status("Read back unavailable".color(colors::SKIPPED).to_string()),
    }
}

fn legacy_report(outcome: &LegacyOutcome) {
    aligned_line("Config file", outcome.path.display().to_string());
    let block = if outcome.replaced { "replaced" } else { "appended" };
    aligned_line("Block", block);
    aligned_line("Daemon", format!("{} restarted", outcome.daemon));
    aligned_line("Wireless", "not prioritized".color(colors::SKIPPED));
}

fn step_detail(record: &StepRecord) -> Detail {
    let value = match &record.outcome {
        StepOutcome::Done => "done".color(colors::DONE),
        StepOutcome::Skipped(reason) => format!("skipped ({reason})").color(colors::SKIPPED),
    };
    (record.step.clone(), value)
}

fn readback_details(profile: &ConnectionProfile) -> Vec<Detail> {
    let or_unset = |v: Option<&str>| v.unwrap_or("unset").to_string();

    vec![
        ("Method".into(), profile.mode.to_string().normal()),
        (
            "Address".into(),
            or_unset(profile.address.as_deref()).color(colors::IPV4_ADDR),
        ),
        (
            "Gateway".into(),
            or_unset(profile.gateway.as_deref()).color(colors::IPV4_ADDR),
        ),
        ("DNS".into(), profile.dns.join(", ").normal()),
        (
            "Metric".into(),
            profile
                .route_metric
                .map_or_else(|| "auto".to_string(), |m| m.to_string())
                .normal(),
        ),
    ]
}

/// Printed once the stream is up.
pub fn stream_banner(config: &StreamConfig, config_path: &Path) {
    header("rtsp stream");
    aligned_line("Config", config_path.display().to_string());
    aligned_line("Resolution", config.resolution.as_str());
    aligned_line("FPS", config.fps.to_string());
    aligned_line("RTSP URL", config.rtsp_url().color(colors::SECONDARY));
    divider();
    print_status("Press Ctrl+C to stop");
}
