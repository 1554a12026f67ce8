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
use chrono::Utc;
use clap::Args;
use dr_common::DrConfig;
use dr_fencing::find_origin_cluster;
use dr_logging::{dr_info, LogContext};
use dr_matcher::{applications_sharing_placement, PlacementIndex};
use dr_models::{DrActionType, DrPlacementControl, ManagedCluster, ResourceSnapshot};
use dr_targeting::{
    check_shared_placement, check_volume_sync_delay, evaluate_error_message, first_blocking,
    reduce, validate_dr_policy, validate_managed_clusters, validate_peer_readiness,
    validate_target_cluster, Action, ErrorMessage, ErrorSlot, State, SyncDelayPolicy,
    TargetSelection, TargetValidationContext, SUPPRESSED_PRIORITY,
};
use serde::Serialize;

use crate::{load_snapshot, parse_action, print_json};

#[derive(Debug, Args)]
pub struct TargetCommand {
    /// Resource snapshot (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    snapshot: PathBuf,
    /// DRPlacementControl name.
    #[arg(long, value_name = "NAME")]
    drpc: String,
    /// Restrict the DRPC lookup to a namespace.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,
    /// Requested action (failover or relocate).
    #[arg(long, value_parser = parse_action)]
    action: DrActionType,
    /// Candidate target cluster.
    #[arg(long, value_name = "NAME")]
    cluster: String,
    /// Application name used for the shared-placement advisory.
    #[arg(long, value_name = "NAME")]
    application: Option<String>,
    /// Include advisory messages (overrides the configuration).
    #[arg(long = "include-warnings", action = clap::ArgAction::SetTrue)]
    include_warnings: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetReport {
    drpc: String,
    action: DrActionType,
    origin_cluster: Option<String>,
    selection: Option<TargetSelection>,
    state: State,
    warnings: Vec<ErrorMessage>,
    can_initiate: bool,
}

pub fn run(cmd: TargetCommand, config: &DrConfig) -> Result<()> {
    let snapshot = load_snapshot(&cmd.snapshot)?;
    let drpc = snapshot
        .drpc(&cmd.drpc, cmd.namespace.as_deref())
        .ok_or_else(|| anyhow!("DRPlacementControl {} not found in snapshot", cmd.drpc))?;
    let include_warnings = cmd.include_warnings || config.validation.include_warnings;
    let report = evaluate(&cmd, config, &snapshot, drpc, include_warnings);
    print_json(&report)
}

fn evaluate(
    cmd: &TargetCommand,
    config: &DrConfig,
    snapshot: &ResourceSnapshot,
    drpc: &DrPlacementControl,
    include_warnings: bool,
) -> TargetReport {
    let action = cmd.action;
    let application = cmd.application.as_deref().unwrap_or(drpc.name());
    let log = LogContext::new()
        .with_application(application)
        .with_namespace(drpc.namespace())
        .with_action(action.as_str());

    let mut state = reduce(State::default(), Action::SetActionType(action));
    let policy = snapshot.dr_policy(drpc.policy_name());

    let policy_error = validate_dr_policy(action, application, policy);
    let Some(policy) = policy.filter(|_| policy_error.is_none()) else {
        state = reduce(
            state,
            Action::SetErrorMessage {
                slot: ErrorSlot::DrPolicyControlState,
                message: policy_error,
            },
        );
        return TargetReport {
            drpc: drpc.name().to_owned(),
            action,
            origin_cluster: None,
            selection: None,
            can_initiate: state.can_initiate(),
            state,
            warnings: Vec::new(),
        };
    };

    let dr_clusters = snapshot.dr_clusters_for(policy);
    let missing = ManagedCluster::new(cmd.cluster.as_str());
    let target = snapshot.managed_cluster(&cmd.cluster).unwrap_or(&missing);
    let origin = find_origin_cluster(action, drpc, policy, &cmd.cluster);

    let mut ctx = TargetValidationContext::new(action, target, &dr_clusters).with_log_context(&log);
    if let Some(origin) = origin {
        ctx = ctx.with_origin(origin);
    }
    let selection = validate_target_cluster(ctx);

    let peer_error = validate_peer_readiness(action, drpc);
    let managed_error = validate_managed_clusters(action, policy, &snapshot.managed_clusters);

    state = [
        Action::SetSelectedTargetCluster(selection.cluster.clone()),
        Action::SetErrorMessage {
            slot: ErrorSlot::TargetCluster,
            message: selection.error.clone(),
        },
        Action::SetErrorMessage {
            slot: ErrorSlot::ManagedClusters,
            message: managed_error,
        },
        Action::SetErrorMessage {
            slot: ErrorSlot::DrPolicyControlState,
            message: first_blocking(peer_error),
        },
    ]
    .into_iter()
    .fold(state, reduce);

    let delay = SyncDelayPolicy {
        factor: config.validation.volume_sync_delay_factor,
        grace: chrono::Duration::from_std(config.validation.volume_sync_grace)
            .unwrap_or_else(|_| chrono::Duration::zero()),
    };
    let sharing = applications_sharing_placement(
        &snapshot.applications,
        &snapshot.subscriptions,
        PlacementIndex {
            rules: &snapshot.placement_rules,
            placements: &snapshot.placements,
            decisions: &snapshot.placement_decisions,
        },
        &config.scheduler.name,
        drpc.namespace(),
        drpc.placement_name(),
    );
    let warnings: Vec<ErrorMessage> = [
        selection.replication.and_then(|replication| {
            check_volume_sync_delay(replication, policy, drpc, Utc::now(), delay)
        }),
        check_shared_placement(action, application, drpc.placement_name(), &sharing),
    ]
    .into_iter()
    .flatten()
    .filter(|warning| evaluate_error_message(warning.kind, include_warnings) != SUPPRESSED_PRIORITY)
    .collect();

    let can_initiate = selection.is_eligible() && state.can_initiate();
    dr_info!(
        context = log.clone().with_cluster(&cmd.cluster),
        "target evaluation finished: can_initiate={} warnings={}",
        can_initiate,
        warnings.len()
    );

    TargetReport {
        drpc: drpc.name().to_owned(),
        action,
        origin_cluster: origin.map(str::to_owned),
        selection: Some(selection),
        state,
        warnings,
        can_initiate,
    }
}
