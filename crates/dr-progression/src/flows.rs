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

use dr_models::DrActionType;
use serde::Serialize;

/// Coarse, display-stable step of an in-flight action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepLabel {
    Preparing,
    Failover,
    Syncing,
    Restoring,
    #[serde(rename = "Clean up")]
    CleanUp,
}

impl StepLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepLabel::Preparing => "Preparing",
            StepLabel::Failover => "Failover",
            StepLabel::Syncing => "Syncing",
            StepLabel::Restoring => "Restoring",
            StepLabel::CleanUp => "Clean up",
        }
    }
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a flow and the controller progressions it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEntry {
    pub label: StepLabel,
    pub statuses: &'static [&'static str],
}

impl FlowEntry {
    pub fn covers(&self, progression: &str) -> bool {
        self.statuses.contains(&progression)
    }
}

pub static FAILOVER_FLOW: [FlowEntry; 4] = [
    FlowEntry {
        label: StepLabel::Preparing,
        statuses: &[
            "Initial",
            "CheckingFailoverPrerequisites",
            "WaitForFencing",
            "WaitForStorageMaintenanceActivation",
            "Paused",
        ],
    },
    FlowEntry {
        label: StepLabel::Failover,
        statuses: &[
            "FailingOverToCluster",
            "ClearingPlacement",
            "UpdatingPlacement",
            "UpdatedPlacement",
        ],
    },
    FlowEntry {
        label: StepLabel::Restoring,
        statuses: &[
            "WaitingForResourceRestore",
            "EnsuringVolSyncSetup",
            "SettingUpVolSyncDest",
            "WaitForReadiness",
            "EnsuringVolumesAreSecondary",
            "Deploying",
            "Deployed",
        ],
    },
    FlowEntry {
        label: StepLabel::CleanUp,
        statuses: &["Cleaning Up", "WaitOnUserToCleanUp"],
    },
];

pub static RELOCATE_FLOW: [FlowEntry; 4] = [
    FlowEntry {
        label: StepLabel::Preparing,
        statuses: &[
            "Initial",
            "CheckingRelocationPrerequisites",
            "PreparingFinalSync",
            "ClearingPlacement",
            "Paused",
        ],
    },
    FlowEntry {
        label: StepLabel::Syncing,
        statuses: &[
            "RunningFinalSync",
            "FinalSyncComplete",
            "EnsuringVolumesAreSecondary",
            "EnsuringVolSyncSetup",
            "SettingUpVolSyncDest",
        ],
    },
    FlowEntry {
        label: StepLabel::Restoring,
        statuses: &[
            "WaitingForResourceRestore",
            "UpdatingPlacement",
            "UpdatedPlacement",
            "WaitForReadiness",
            "Deploying",
        ],
    },
    FlowEntry {
        label: StepLabel::CleanUp,
        statuses: &["Cleaning Up", "WaitOnUserToCleanUp"],
    },
];

/// Discovered applications are removed from the origin before the final sync,
/// so their clean-up step directly follows Preparing. The controller's
/// trailing `Cleaning Up` is folded into Restoring.
pub static DISCOVERED_RELOCATE_FLOW: [FlowEntry; 4] = [
    FlowEntry {
        label: StepLabel::Preparing,
        statuses: &[
            "Initial",
            "CheckingRelocationPrerequisites",
            "PreparingFinalSync",
            "ClearingPlacement",
            "Paused",
        ],
    },
    FlowEntry {
        label: StepLabel::CleanUp,
        statuses: &["WaitOnUserToCleanUp"],
    },
    FlowEntry {
        label: StepLabel::Syncing,
        statuses: &[
            "RunningFinalSync",
            "FinalSyncComplete",
            "EnsuringVolumesAreSecondary",
            "EnsuringVolSyncSetup",
            "SettingUpVolSyncDest",
        ],
    },
    FlowEntry {
        label: StepLabel::Restoring,
        statuses: &[
            "WaitingForResourceRestore",
            "UpdatingPlacement",
            "UpdatedPlacement",
            "WaitForReadiness",
            "Deploying",
            "Cleaning Up",
        ],
    },
];

/// Which table an action is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Flow {
    Failover,
    Relocate,
    DiscoveredRelocate,
}

impl Flow {
    pub fn entries(&self) -> &'static [FlowEntry] {
        match self {
            Flow::Failover => &FAILOVER_FLOW,
            Flow::Relocate => &RELOCATE_FLOW,
            Flow::DiscoveredRelocate => &DISCOVERED_RELOCATE_FLOW,
        }
    }

    /// Position of the clean-up step in this flow.
    pub fn cleanup_index(&self) -> Option<usize> {
        self.entries()
            .iter()
            .position(|entry| entry.label == StepLabel::CleanUp)
    }
}

/// Discovered applications only change the relocate ordering.
pub fn select_flow(action: DrActionType, is_discovered: bool) -> Flow {
    match (action, is_discovered) {
        (DrActionType::Failover, _) => Flow::Failover,
        (DrActionType::Relocate, false) => Flow::Relocate,
        (DrActionType::Relocate, true) => Flow::DiscoveredRelocate,
    }
}
