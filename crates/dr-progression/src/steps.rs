//! ---
//! dr_section: "07-action-progression"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Progression string to step mapping for in-flight DR actions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fmt;

use dr_models::DrpcPhase;
use serde::Serialize;
use tracing::debug;

use crate::flows::{Flow, StepLabel};

/// Progression value the controller reports once the action finished.
pub const PROGRESSION_COMPLETED: &str = "Completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Completed,
    InProgress,
    Pending,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Completed => "Completed",
            StepStatus::InProgress => "InProgress",
            StepStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressionStep {
    pub label: StepLabel,
    pub status: StepStatus,
}

/// Whether the DRPC reports a finished action.
pub fn is_completed(progression: Option<&str>, phase: DrpcPhase) -> bool {
    phase == DrpcPhase::Completed || progression == Some(PROGRESSION_COMPLETED)
}

/// Index of the step covering `progression`.
///
/// Empty and unrecognised progressions map to the first step.
pub fn current_index(progression: Option<&str>, flow: Flow) -> usize {
    let Some(progression) = progression.map(str::trim).filter(|p| !p.is_empty()) else {
        return 0;
    };
    match flow
        .entries()
        .iter()
        .position(|entry| entry.covers(progression))
    {
        Some(index) => index,
        None => {
            debug!(progression, ?flow, "unrecognised progression; using first step");
            0
        }
    }
}

/// Derive the step list of `flow` for the reported progression and phase.
pub fn derive_steps(progression: Option<&str>, phase: DrpcPhase, flow: Flow) -> Vec<ProgressionStep> {
    let entries = flow.entries();
    if is_completed(progression, phase) {
        return entries
            .iter()
            .map(|entry| ProgressionStep {
                label: entry.label,
                status: StepStatus::Completed,
            })
            .collect();
    }

    let current = current_index(progression, flow);
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ProgressionStep {
            label: entry.label,
            status: match index.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::InProgress,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            },
        })
        .collect()
}
