// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Best-effort steps.
//!
//! Some host actions run after the configuration has already been written
//! (bringing a profile down and up again). Their failure must neither abort
//! the run nor disappear. [`best_effort`] logs the error as skipped and keeps
//! a record of it for the final report.

use rpicast_common::{debug, skipped};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// The step failed and the error was discarded. Holds the message.
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: String,
    pub outcome: StepOutcome,
}

impl StepRecord {
    pub fn is_done(&self) -> bool {
        self.outcome == StepOutcome::Done
    }
}

/// Consumes the result of a step whose failure is acceptable.
pub fn best_effort(step: impl Into<String>, result: anyhow::Result<()>) -> StepRecord {
    let step = step.into();
    let outcome = match result {
        Ok(()) => {
            debug!("{step}: ok");
            StepOutcome::Done
        }
        Err(e) => {
            let reason = format!("{e:#}");
            skipped!("{step} failed, continuing: {reason}");
            StepOutcome::Skipped(reason)
        }
    };
    StepRecord { step, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_effort_should_record_failure_without_propagating() {
        let record = best_effort("deactivate eth0", Err(anyhow::anyhow!("not active")));
        assert_eq!(record.step, "deactivate eth0");
        assert_eq!(record.outcome, StepOutcome::Skipped("not active".to_string()));
        assert!(!record.is_done());
    }

    #[test]
    fn best_effort_should_record_success() {
        let record = best_effort("activate eth0", Ok(()));
        assert!(record.is_done());
    }
}
