//! ---
//! dr_section: "07-action-progression"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Progression string to step mapping for in-flight DR actions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{DrActionType, DrPlacementControl, DrpcPhase};
use serde::Serialize;
use tracing::info;

use crate::flows::{select_flow, Flow, StepLabel};
use crate::steps::{current_index, derive_steps, is_completed, ProgressionStep, StepStatus};

/// What the progression view is computed from.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionInput<'a> {
    pub action: DrActionType,
    pub drpc: &'a DrPlacementControl,
    pub is_discovered: bool,
    /// Cluster the workload is leaving, when known.
    pub origin_cluster: Option<&'a str>,
}

/// Display payload for an in-flight action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionView {
    pub flow: Flow,
    pub steps: Vec<ProgressionStep>,
    pub completed: usize,
    pub total: usize,
    /// Step in progress; `None` once every step completed.
    pub current: Option<StepLabel>,
    pub show_cleanup_banner: bool,
    /// Raw controller text, newest progression first, for a log view.
    pub details: Vec<String>,
}

fn show_cleanup_banner(input: &ProgressionInput<'_>, flow: Flow, finished: bool) -> bool {
    match input.action {
        DrActionType::Failover => input.origin_cluster.is_some_and(|c| !c.is_empty()),
        DrActionType::Relocate => {
            if flow != Flow::DiscoveredRelocate {
                return true;
            }
            let Some(cleanup) = flow.cleanup_index() else {
                return true;
            };
            !finished && current_index(input.drpc.progression(), flow) <= cleanup
        }
    }
}

fn details(drpc: &DrPlacementControl) -> Vec<String> {
    let progression = drpc
        .progression()
        .filter(|p| !p.is_empty())
        .map(str::to_owned);
    let conditions = drpc.conditions().iter().filter_map(|condition| {
        condition
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|message| format!("{}: {}", condition.type_, message))
    });
    progression.into_iter().chain(conditions).collect()
}

pub fn progression_view(input: ProgressionInput<'_>) -> ProgressionView {
    let flow = select_flow(input.action, input.is_discovered);
    let progression = input.drpc.progression();
    let phase: DrpcPhase = input.drpc.phase();
    let steps = derive_steps(progression, phase, flow);
    let finished = is_completed(progression, phase);

    let completed = steps
        .iter()
        .filter(|step| step.status == StepStatus::Completed)
        .count();
    let current = steps
        .iter()
        .find(|step| step.status == StepStatus::InProgress)
        .map(|step| step.label);

    let view = ProgressionView {
        flow,
        total: steps.len(),
        completed,
        current,
        show_cleanup_banner: show_cleanup_banner(&input, flow, finished),
        details: details(input.drpc),
        steps,
    };
    info!(
        drpc = input.drpc.name(),
        action = %input.action,
        progression = progression.unwrap_or_default(),
        completed = view.completed,
        total = view.total,
        "progression view derived"
    );
    view
}
