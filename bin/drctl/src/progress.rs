//! ---
//! dr_section: "08-cli"
//! dr_subsection: "binary"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Command line driver for the DR decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use dr_common::DrConfig;
use dr_fencing::find_origin_cluster;
use dr_models::{DrActionType, DrPlacementControl, ResourceSnapshot};
use dr_progression::{progression_view, ProgressionInput, ProgressionView};

use crate::{load_snapshot, parse_action, print_json};

#[derive(Debug, Args)]
pub struct ProgressCommand {
    /// Resource snapshot (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    snapshot: PathBuf,
    /// DRPlacementControl name.
    #[arg(long, value_name = "NAME")]
    drpc: String,
    /// Restrict the DRPC lookup to a namespace.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,
    /// Action to render; defaults to the DRPC's `spec.action`.
    #[arg(long, value_parser = parse_action)]
    action: Option<DrActionType>,
    /// Render the discovered-application relocate flow.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    discovered: bool,
}

pub fn run(cmd: ProgressCommand, _config: &DrConfig) -> Result<()> {
    let snapshot = load_snapshot(&cmd.snapshot)?;
    let drpc = snapshot
        .drpc(&cmd.drpc, cmd.namespace.as_deref())
        .ok_or_else(|| anyhow!("DRPlacementControl {} not found in snapshot", cmd.drpc))?;
    let action = cmd
        .action
        .or(drpc.spec.action)
        .ok_or_else(|| anyhow!("DRPlacementControl {} has no action; pass --action", cmd.drpc))?;
    print_json(&view(&snapshot, drpc, action, cmd.discovered))
}

/// Failover moves to `failoverCluster`, relocate back to `preferredCluster`.
fn action_target(action: DrActionType, drpc: &DrPlacementControl) -> Option<&str> {
    match action {
        DrActionType::Failover => drpc.spec.failover_cluster.as_deref(),
        DrActionType::Relocate => drpc.spec.preferred_cluster.as_deref(),
    }
}

fn view(
    snapshot: &ResourceSnapshot,
    drpc: &DrPlacementControl,
    action: DrActionType,
    is_discovered: bool,
) -> ProgressionView {
    let origin_cluster = snapshot
        .dr_policy(drpc.policy_name())
        .zip(action_target(action, drpc))
        .and_then(|(policy, target)| find_origin_cluster(action, drpc, policy, target));
    progression_view(ProgressionInput {
        action,
        drpc,
        is_discovered,
        origin_cluster,
    })
}
