//! ---
//! dr_section: "05-replication-fencing"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Replication type derivation and fencing precondition checks."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{DrActionType, DrCluster, FencingPhase, ReplicationType};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// A fencing precondition that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FencingViolation {
    #[error("Source cluster {cluster} is not fenced.")]
    SourceClusterNotFenced { cluster: String },
    #[error("Target cluster {cluster} is not unfenced.")]
    TargetClusterNotUnfenced { cluster: String },
    #[error("Clusters {} must be unfenced before relocating.", .clusters.join(" and "))]
    RelocateRequiresUnfenced { clusters: Vec<String> },
}

/// Outcome of the fencing evaluation for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FencingVerdict {
    pub replication: ReplicationType,
    /// Every violation detected, in check order.
    pub violations: Vec<FencingViolation>,
    /// The single surfaced violation: the first one detected.
    pub error: Option<FencingViolation>,
}

impl FencingVerdict {
    fn from_violations(replication: ReplicationType, violations: Vec<FencingViolation>) -> Self {
        let error = violations.first().cloned();
        Self {
            replication,
            violations,
            error,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.error.is_none()
    }
}

fn phase_of(clusters: &[DrCluster], name: &str) -> FencingPhase {
    clusters
        .iter()
        .find(|cluster| cluster.name() == name)
        .map(DrCluster::phase)
        .unwrap_or_default()
}

/// Check the fencing preconditions of `action` moving the workload from `origin` to `target`.
///
/// Only synchronous replication is fenced; asynchronous policies always pass.
/// A cluster without a DRCluster resource counts as phase `Unknown`.
pub fn validate_fencing(
    action: DrActionType,
    replication: ReplicationType,
    clusters: &[DrCluster],
    origin: &str,
    target: &str,
) -> FencingVerdict {
    if replication == ReplicationType::Async {
        return FencingVerdict::from_violations(replication, Vec::new());
    }

    let origin_phase = phase_of(clusters, origin);
    let target_phase = phase_of(clusters, target);
    debug!(
        %action,
        origin,
        %origin_phase,
        target,
        %target_phase,
        "evaluating fencing preconditions"
    );

    let mut violations = Vec::new();
    match action {
        DrActionType::Failover => {
            if origin_phase != FencingPhase::Fenced {
                violations.push(FencingViolation::SourceClusterNotFenced {
                    cluster: origin.to_owned(),
                });
            }
            if !target_phase.is_unfenced() {
                violations.push(FencingViolation::TargetClusterNotUnfenced {
                    cluster: target.to_owned(),
                });
            }
        }
        DrActionType::Relocate => {
            let fenced: Vec<String> = [(origin, origin_phase), (target, target_phase)]
                .into_iter()
                .filter(|(_, phase)| !phase.is_unfenced())
                .map(|(name, _)| name.to_owned())
                .collect();
            if !fenced.is_empty() {
                violations.push(FencingViolation::RelocateRequiresUnfenced { clusters: fenced });
            }
        }
    }
    FencingVerdict::from_violations(replication, violations)
}
