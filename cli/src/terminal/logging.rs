// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal Logging
//!
//! Turns `tracing` events into one prefixed line each:
//!
//! | prefix | source                    |
//! |--------|---------------------------|
//! | `[+]`  | `success!`                |
//! | `[»]`  | `info!`                   |
//! | `[*]`  | `warn!`                   |
//! | `[~]`  | `skipped!`                |
//! | `[-]`  | `error!`                  |
//! | `[?]`  | `debug!`                  |
//!
//! Events on the [`PRINT_TARGET`] target are written verbatim, which is how
//! the report tables end up between log lines without a prefix.

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const PRINT_TARGET: &str = "rpicast::print";

pub struct RpicastFormatter;

impl<S, N> FormatEvent<S, N> for RpicastFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawVisitor::new(writer.by_ref());
            event.record(&mut visitor);
            return writeln!(writer);
        }

        let mut meta_visitor = MetaVisitor::default();
        event.record(&mut meta_visitor);

        let (symbol, color_func) = prefix(meta.level(), meta_visitor.status.as_deref());
        write!(writer, "{} ", color_func(symbol.into()))?;

        let mut output_visitor = OutputVisitor::new(writer.by_ref());
        event.record(&mut output_visitor);

        writeln!(writer)
    }
}

type Paint = fn(ColoredString) -> ColoredString;

fn prefix(level: &Level, status: Option<&str>) -> (&'static str, Paint) {
    match *level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => match status {
            Some("info") => ("[»]", |s| s.cyan().bold()),
            _ => ("[+]", |s| s.green().bold()),
        },
        Level::WARN => match status {
            Some("skipped") => ("[~]", |s| s.yellow().dimmed()),
            _ => ("[*]", |s| s.yellow().bold()),
        },
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "info",
        1 => "info,rpicast_core=debug,rpicast_cli=debug",
        _ => "debug",
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(RpicastFormatter)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .init();
}

#[derive(Default)]
struct MetaVisitor {
    status: Option<String>,
}

impl Visit for MetaVisitor {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "status" {
            self.status = Some(value.to_string());
        }
    }
}

struct OutputVisitor<'a> {
    writer: Writer<'a>,
}

impl<'a> OutputVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self { writer }
    }
}

impl Visit for OutputVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "status" {
            return;
        }
        self.record_debug(field, &value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.writer, "{:?}", value);
        } else {
            let _ = write!(self.writer, " {}={:?}", field.name().italic(), value);
        }
    }
}

struct RawVisitor<'a> {
    writer: Writer<'a>,
}

impl<'a> RawVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self { writer }
    }
}

impl Visit for RawVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            let _ = write!(self.writer, "{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            let _ = write!(self.writer, "{value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_should_mark_skipped_warnings() {
        assert_eq!(prefix(&Level::WARN, Some("skipped")).0, "[~]");
        assert_eq!(prefix(&Level::WARN, Some("warn")).0, "[*]");
    }

    #[test]
    fn prefix_should_split_info_and_success() {
        assert_eq!(prefix(&Level::INFO, Some("info")).0, "[»]");
        assert_eq!(prefix(&Level::INFO, Some("success")).0, "[+]");
        assert_eq!(prefix(&Level::INFO, None).0, "[+]");
    }
}
