//! ---
//! dr_section: "05-replication-fencing"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Replication type derivation and fencing precondition checks."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{DrActionType, DrPlacementControl, DrPolicy};

/// Cluster the workload moves away from when `action` targets `target`.
///
/// Failover leaves the preferred cluster, relocate leaves the failover cluster.
/// When the DRPC does not name one (or names the target itself), the policy
/// peer of the target is used.
pub fn find_origin_cluster<'a>(
    action: DrActionType,
    drpc: &'a DrPlacementControl,
    policy: &'a DrPolicy,
    target: &str,
) -> Option<&'a str> {
    let declared = match action {
        DrActionType::Failover => drpc.spec.preferred_cluster.as_deref(),
        DrActionType::Relocate => drpc.spec.failover_cluster.as_deref(),
    };
    declared
        .filter(|cluster| !cluster.is_empty() && *cluster != target)
        .or_else(|| policy.peer_of(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drpc() -> DrPlacementControl {
        let mut drpc = DrPlacementControl::new("busybox-drpc", "busybox", "sync", "busybox-placement");
        drpc.spec.preferred_cluster = Some("east".into());
        drpc.spec.failover_cluster = Some("west".into());
        drpc
    }

    #[test]
    fn failover_leaves_preferred_cluster() {
        let policy = DrPolicy::new("sync", ["east", "west"]);
        assert_eq!(
            find_origin_cluster(DrActionType::Failover, &drpc(), &policy, "west"),
            Some("east")
        );
    }

    #[test]
    fn relocate_leaves_failover_cluster() {
        let policy = DrPolicy::new("sync", ["east", "west"]);
        assert_eq!(
            find_origin_cluster(DrActionType::Relocate, &drpc(), &policy, "east"),
            Some("west")
        );
    }

    #[test]
    fn falls_back_to_policy_peer() {
        let policy = DrPolicy::new("sync", ["east", "west"]);
        let bare = DrPlacementControl::new("busybox-drpc", "busybox", "sync", "busybox-placement");
        assert_eq!(
            find_origin_cluster(DrActionType::Failover, &bare, &policy, "west"),
            Some("east")
        );
        assert_eq!(
            find_origin_cluster(DrActionType::Failover, &drpc(), &policy, "east"),
            Some("west")
        );
        assert_eq!(
            find_origin_cluster(DrActionType::Failover, &bare, &policy, "north"),
            None
        );
    }
}
