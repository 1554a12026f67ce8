//! ---
//! dr_section: "06-target-validation"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Target cluster eligibility, readiness checks and modal state."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use chrono::{DateTime, Duration, Utc};
use dr_models::{DrActionType, DrPlacementControl, DrPolicy, ReplicationType};
use tracing::debug;

use crate::errors::{ErrorMessage, ErrorMessageType};

/// DRPC condition reporting that the peer cluster can take over.
pub const CONDITION_PEER_READY: &str = "PeerReady";
/// DRPC condition reporting that the workload is available.
pub const CONDITION_AVAILABLE: &str = "Available";

/// Default multiple of the scheduling interval before a sync counts as late.
pub const DEFAULT_SYNC_DELAY_FACTOR: u32 = 3;

fn by_action(
    action: DrActionType,
    failover: ErrorMessageType,
    relocate: ErrorMessageType,
) -> ErrorMessageType {
    match action {
        DrActionType::Failover => failover,
        DrActionType::Relocate => relocate,
    }
}

/// Presence and shape of the DR policy protecting `application`.
pub fn validate_dr_policy(
    action: DrActionType,
    application: &str,
    policy: Option<&DrPolicy>,
) -> Option<ErrorMessage> {
    let Some(policy) = policy else {
        let kind = by_action(
            action,
            ErrorMessageType::DrIsNotEnabledFailover,
            ErrorMessageType::DrIsNotEnabledRelocate,
        );
        return Some(ErrorMessage::new(kind, &[application]));
    };
    if policy.is_valid() {
        return None;
    }
    let kind = by_action(
        action,
        ErrorMessageType::FailoverReadinessCheckFailed,
        ErrorMessageType::RelocateReadinessCheckFailed,
    );
    let detail = format!(
        "policy {} pairs {} clusters instead of 2.",
        policy.name(),
        policy.clusters().len()
    );
    Some(ErrorMessage::new(kind, &[&detail]))
}

/// Both `PeerReady` and `Available` must be `True` on the DRPC.
pub fn validate_peer_readiness(
    action: DrActionType,
    drpc: &DrPlacementControl,
) -> Option<ErrorMessage> {
    let ready = [CONDITION_PEER_READY, CONDITION_AVAILABLE]
        .iter()
        .all(|type_| drpc.condition(type_).is_some_and(|c| c.is_true()));
    debug!(drpc = drpc.name(), ready, "peer readiness evaluated");
    if ready {
        return None;
    }
    let kind = by_action(
        action,
        ErrorMessageType::PeerIsNotReadyFailover,
        ErrorMessageType::PeerIsNotReadyRelocate,
    );
    Some(ErrorMessage::new(kind, &[drpc.name()]))
}

/// The operator must pick at least one subscription group.
pub fn validate_subscription_groups(application: &str, selected: &[String]) -> Option<ErrorMessage> {
    if selected.is_empty() {
        Some(ErrorMessage::new(
            ErrorMessageType::NoSubscriptionGroupFound,
            &[application],
        ))
    } else {
        None
    }
}

/// Lateness threshold for asynchronous volume replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncDelayPolicy {
    pub factor: u32,
    pub grace: Duration,
}

impl SyncDelayPolicy {
    /// `interval × factor + grace`, or `None` when it leaves chrono's range.
    pub fn allowed_delay(&self, interval: Duration) -> Option<Duration> {
        let factor = i32::try_from(self.factor.max(1)).ok()?;
        interval.checked_mul(factor)?.checked_add(&self.grace)
    }
}

impl Default for SyncDelayPolicy {
    fn default() -> Self {
        Self {
            factor: DEFAULT_SYNC_DELAY_FACTOR,
            grace: Duration::zero(),
        }
    }
}

/// Advisory raised when the last group sync is older than the allowed delay.
///
/// Synchronous replication has no sync lag. A DRPC that has never synced, a
/// policy without a parsable interval, or an allowance too large to represent
/// raises nothing.
pub fn check_volume_sync_delay(
    replication: ReplicationType,
    policy: &DrPolicy,
    drpc: &DrPlacementControl,
    now: DateTime<Utc>,
    delay: SyncDelayPolicy,
) -> Option<ErrorMessage> {
    if replication != ReplicationType::Async {
        return None;
    }
    let interval = policy.scheduling_interval()?;
    let last_sync = drpc.last_group_sync_time()?;
    let Some(allowed) = delay.allowed_delay(interval) else {
        debug!(drpc = drpc.name(), factor = delay.factor, "sync allowance overflows; never late");
        return None;
    };
    let elapsed = now.signed_duration_since(last_sync);
    debug!(
        drpc = drpc.name(),
        elapsed_minutes = elapsed.num_minutes(),
        allowed_minutes = allowed.num_minutes(),
        "volume sync delay evaluated"
    );
    if elapsed <= allowed {
        return None;
    }
    Some(ErrorMessage::new(
        ErrorMessageType::VolumeSyncDelay,
        &[
            drpc.name(),
            &elapsed.num_minutes().to_string(),
            &allowed.num_minutes().to_string(),
        ],
    ))
}

/// Advisory listing the other applications moved along with `application`.
pub fn check_shared_placement(
    action: DrActionType,
    application: &str,
    placement: &str,
    apps_sharing: &[String],
) -> Option<ErrorMessage> {
    let others: Vec<&str> = apps_sharing
        .iter()
        .map(String::as_str)
        .filter(|name| *name != application)
        .collect();
    if others.is_empty() {
        return None;
    }
    let kind = by_action(
        action,
        ErrorMessageType::OtherApplicationsWillBeFailedOver,
        ErrorMessageType::OtherApplicationsWillBeRelocated,
    );
    Some(ErrorMessage::new(kind, &[&others.join(", "), placement]))
}
