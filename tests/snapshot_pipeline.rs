//! ---
//! dr_section: "15-testing-qa"
//! dr_subsection: "integration-tests"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Integration and validation tests for the DR decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use dr_common::DrConfig;
use dr_fencing::find_origin_cluster;
use dr_matcher::{
    applications_sharing_placement, filter_dr_subscriptions, get_app_dr_info, PlacementIndex,
};
use dr_models::{DrActionType, ResourceSnapshot};
use dr_progression::{progression_view, ProgressionInput, StepLabel};
use dr_targeting::{
    check_shared_placement, check_volume_sync_delay, validate_managed_clusters,
    validate_peer_readiness, validate_target_cluster, ErrorMessageType, SyncDelayPolicy,
    TargetValidationContext,
};

fn fixture() -> ResourceSnapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/busybox-sync.yaml");
    ResourceSnapshot::from_path(&path).expect("fixture loads")
}

#[test]
fn application_resolves_to_its_drpc() {
    let snapshot = fixture();
    let app = snapshot
        .application("busybox", Some("busybox"))
        .expect("application");
    let grouped = filter_dr_subscriptions(
        app,
        &snapshot.subscriptions,
        &snapshot.placement_rules,
        &DrConfig::default().scheduler.name,
    );
    let info = get_app_dr_info(&snapshot.dr_placement_controls, &grouped, &snapshot.placement_rules);
    assert_eq!(info.len(), 2);
    assert!(info.iter().all(|entry| entry.cluster_name == "east"));
    assert_eq!(info[0].subscriptions, vec!["busybox-sub".to_owned()]);
}

#[test]
fn sync_failover_to_west_is_allowed() {
    let snapshot = fixture();
    let drpc = snapshot.drpc("busybox-drpc", Some("busybox")).expect("drpc");
    let policy = snapshot.dr_policy(drpc.policy_name()).expect("policy");
    let dr_clusters = snapshot.dr_clusters_for(policy);
    let target = snapshot.managed_cluster("west").expect("west");
    let origin = find_origin_cluster(DrActionType::Failover, drpc, policy, "west").expect("origin");
    assert_eq!(origin, "east");

    let selection = validate_target_cluster(
        TargetValidationContext::new(DrActionType::Failover, target, &dr_clusters).with_origin(origin),
    );
    assert!(selection.is_eligible(), "{:?}", selection.error);
    assert!(selection.cluster.last_available_time.is_some());

    let peer = validate_peer_readiness(DrActionType::Failover, drpc).expect("available is false");
    assert_eq!(peer.kind, ErrorMessageType::PeerIsNotReadyFailover);
}

#[test]
fn relocate_gate_passes_while_one_cluster_is_up() {
    let snapshot = fixture();
    let policy = snapshot.dr_policy("sync-policy").expect("policy");
    assert!(validate_managed_clusters(DrActionType::Relocate, policy, &snapshot.managed_clusters).is_none());

    let only_east: Vec<_> = snapshot
        .managed_clusters
        .iter()
        .filter(|cluster| cluster.name() == "east")
        .cloned()
        .collect();
    let error = validate_managed_clusters(DrActionType::Relocate, policy, &only_east)
        .expect("every cluster down");
    assert_eq!(error.kind, ErrorMessageType::ManagedClustersAreDown);
}

#[test]
fn async_policy_advisories() {
    let snapshot = fixture();
    let drpc = snapshot
        .drpc("busybox-async-drpc", None)
        .expect("async drpc");
    let policy = snapshot.dr_policy(drpc.policy_name()).expect("policy");
    let dr_clusters = snapshot.dr_clusters_for(policy);
    let target = snapshot.managed_cluster("west-async").expect("target");
    let selection = validate_target_cluster(TargetValidationContext::new(
        DrActionType::Failover,
        target,
        &dr_clusters,
    ));
    let replication = selection.replication.expect("available target");

    let synced = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let late = check_volume_sync_delay(
        replication,
        policy,
        drpc,
        synced + Duration::hours(1),
        SyncDelayPolicy::default(),
    )
    .expect("sync is late");
    assert_eq!(late.kind, ErrorMessageType::VolumeSyncDelay);

    let sharing = applications_sharing_placement(
        &snapshot.applications,
        &snapshot.subscriptions,
        PlacementIndex::from_rules(&snapshot.placement_rules),
        "ramen",
        drpc.namespace(),
        drpc.placement_name(),
    );
    assert_eq!(sharing.len(), 2);
    let shared = check_shared_placement(DrActionType::Failover, "busybox", drpc.placement_name(), &sharing)
        .expect("busybox-reports moves too");
    assert!(shared.message.contains("busybox-reports"));
}

#[test]
fn in_flight_failover_progress() {
    let snapshot = fixture();
    let drpc = snapshot.drpc("busybox-drpc", None).expect("drpc");
    let view = progression_view(ProgressionInput {
        action: DrActionType::Failover,
        drpc,
        is_discovered: false,
        origin_cluster: Some("east"),
    });
    assert_eq!(view.current, Some(StepLabel::Restoring));
    assert_eq!(view.completed, 2);
    assert!(view.show_cleanup_banner);
    assert_eq!(view.details.len(), 2);
}

#[test]
fn config_file_drives_validation_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("drctl.toml");
    fs::write(
        &path,
        "[validation]\ninclude_warnings = true\nvolume_sync_delay_factor = 5\n",
    )
    .expect("write config");
    let config = DrConfig::load(&[&path]).expect("config loads");
    assert!(config.validation.include_warnings);
    assert_eq!(config.validation.volume_sync_delay_factor, 5);
    assert_eq!(config.scheduler.name, "ramen");
}
