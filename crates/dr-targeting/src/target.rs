//! ---
//! dr_section: "06-target-validation"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Target cluster eligibility, readiness checks and modal state."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use dr_fencing::{get_replication_type_using_dr_clusters, validate_fencing, FencingVerdict};
use dr_logging::{dr_debug, log_decision_event, DecisionOutcome, LogContext};
use dr_models::{DrActionType, DrCluster, DrPolicy, ManagedCluster, ReplicationType};
use serde::Serialize;

use crate::errors::{ErrorMessage, ErrorMessageType};

/// Name and namespace of a managed cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub name: String,
    pub namespace: String,
}

/// The cluster half of a target selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetClusterType {
    pub cluster_info: ClusterInfo,
    pub is_cluster_available: bool,
    pub last_available_time: Option<DateTime<Utc>>,
}

impl TargetClusterType {
    pub fn from_managed_cluster(cluster: &ManagedCluster) -> Self {
        // Cluster-scoped; the hub namespace of a managed cluster carries its name.
        let namespace = cluster
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| cluster.name().to_owned());
        Self {
            cluster_info: ClusterInfo {
                name: cluster.name().to_owned(),
                namespace,
            },
            is_cluster_available: cluster.is_available(),
            last_available_time: cluster.last_available_time(),
        }
    }

    pub fn name(&self) -> &str {
        &self.cluster_info.name
    }
}

/// Result of validating one candidate target cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSelection {
    pub cluster: TargetClusterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication: Option<ReplicationType>,
    /// Fencing evaluation; absent when the target is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fencing: Option<FencingVerdict>,
    pub error: Option<ErrorMessage>,
}

impl TargetSelection {
    pub fn is_eligible(&self) -> bool {
        self.cluster.is_cluster_available && self.error.is_none()
    }

    /// Every fencing violation rendered as a catalogue message.
    pub fn fencing_candidates(&self) -> Vec<ErrorMessage> {
        self.fencing
            .iter()
            .flat_map(|verdict| verdict.violations.iter().map(ErrorMessage::from))
            .collect()
    }
}

/// Inputs for [`validate_target_cluster`].
#[derive(Debug, Clone, Copy)]
pub struct TargetValidationContext<'a> {
    pub action: DrActionType,
    pub target: &'a ManagedCluster,
    /// DRClusters of the policy, in policy order.
    pub dr_clusters: &'a [DrCluster],
    /// Cluster the workload currently runs on.
    pub origin: Option<&'a str>,
    pub log: Option<&'a LogContext<'a>>,
}

impl<'a> TargetValidationContext<'a> {
    pub fn new(action: DrActionType, target: &'a ManagedCluster, dr_clusters: &'a [DrCluster]) -> Self {
        Self {
            action,
            target,
            dr_clusters,
            origin: None,
            log: None,
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_log_context(mut self, log: &'a LogContext<'a>) -> Self {
        self.log = Some(log);
        self
    }

    fn origin_name(&self) -> &'a str {
        let target = self.target.name();
        self.origin
            .or_else(|| {
                self.dr_clusters
                    .iter()
                    .map(DrCluster::name)
                    .find(|name| *name != target)
            })
            .unwrap_or_default()
    }
}

/// Decide whether the selected managed cluster may receive the workload.
///
/// Availability is checked first and short-circuits; fencing only runs for
/// an available target under synchronous replication.
pub fn validate_target_cluster(ctx: TargetValidationContext<'_>) -> TargetSelection {
    let cluster = TargetClusterType::from_managed_cluster(ctx.target);
    let target = ctx.target.name();
    let log = ctx.log.cloned().unwrap_or_default();
    let log = LogContext {
        cluster: Some(target),
        ..log
    };

    if !cluster.is_cluster_available {
        let error = ErrorMessage::new(ErrorMessageType::TargetClusterIsNotAvailable, &[target]);
        log_decision_event(
            Some(&log),
            "target.validated",
            &error.message,
            DecisionOutcome::Blocked,
        );
        return TargetSelection {
            cluster,
            replication: None,
            fencing: None,
            error: Some(error),
        };
    }

    let replication = get_replication_type_using_dr_clusters(ctx.dr_clusters);
    let origin = ctx.origin_name();
    dr_debug!(
        context = log,
        "target available, replication {} from origin {}",
        replication,
        origin
    );
    let verdict = validate_fencing(ctx.action, replication, ctx.dr_clusters, origin, target);
    let error = verdict.error.as_ref().map(ErrorMessage::from);

    match &error {
        Some(error) => log_decision_event(
            Some(&log),
            "target.validated",
            &error.message,
            DecisionOutcome::Blocked,
        ),
        None => log_decision_event(
            Some(&log),
            "target.validated",
            "target cluster eligible",
            DecisionOutcome::Allowed,
        ),
    }

    TargetSelection {
        cluster,
        replication: Some(replication),
        fencing: Some(verdict),
        error,
    }
}

/// Policy-level availability gate for relocate.
///
/// Relocate needs at least one reachable cluster of the policy; a cluster
/// without a ManagedCluster resource counts as down. Failover is never gated
/// here.
pub fn validate_managed_clusters(
    action: DrActionType,
    policy: &DrPolicy,
    managed_clusters: &[ManagedCluster],
) -> Option<ErrorMessage> {
    if action != DrActionType::Relocate {
        return None;
    }
    let any_up = policy.clusters().iter().any(|name| {
        managed_clusters
            .iter()
            .any(|cluster| cluster.name() == name && cluster.is_available())
    });
    if any_up {
        None
    } else {
        Some(ErrorMessage::new(
            ErrorMessageType::ManagedClustersAreDown,
            &[policy.name()],
        ))
    }
}
