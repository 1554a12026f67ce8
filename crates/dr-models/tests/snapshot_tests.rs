//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fs;

use dr_models::{DrActionType, FencingPhase, ModelError, ResourceSnapshot};
use tempfile::tempdir;

const SNAPSHOT_YAML: &str = r#"
drPolicies:
  - metadata: { name: sync-policy }
    spec:
      drClusters: [east, west]
      schedulingInterval: ""
drClusters:
  - metadata: { name: east }
    spec: { region: us-e }
    status: { phase: Fenced }
  - metadata: { name: west }
    spec: { region: us-e }
    status: { phase: Unfenced }
drPlacementControls:
  - metadata: { name: busybox-drpc, namespace: busybox }
    spec:
      drPolicyRef: { name: sync-policy }
      placementRef: { kind: PlacementRule, name: busybox-placement }
      preferredCluster: east
      action: Failover
managedClusters:
  - metadata: { name: west }
    status:
      conditions:
        - type: ManagedClusterConditionAvailable
          status: "True"
          lastTransitionTime: "2024-03-01T10:00:00Z"
"#;

#[test]
fn loads_yaml_snapshot() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("snapshot.yaml");
    fs::write(&path, SNAPSHOT_YAML).expect("write snapshot");

    let snapshot = ResourceSnapshot::from_path(&path).expect("snapshot loads");
    let policy = snapshot.dr_policy("sync-policy").expect("policy present");
    assert!(policy.is_valid());
    let clusters = snapshot.dr_clusters_for(policy);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].phase(), FencingPhase::Fenced);

    let drpc = snapshot
        .drpc("busybox-drpc", Some("busybox"))
        .expect("drpc present");
    assert_eq!(drpc.spec.action, Some(DrActionType::Failover));
    assert!(snapshot.drpc("busybox-drpc", Some("other")).is_none());

    let west = snapshot.managed_cluster("west").expect("managed cluster");
    assert!(west.is_available());
    assert!(west.last_available_time().is_some());
}

#[test]
fn loads_json_snapshot() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("snapshot.json");
    fs::write(
        &path,
        r#"{"managedClusters":[{"metadata":{"name":"east"}}],"drPolicies":[]}"#,
    )
    .expect("write snapshot");
    let snapshot = ResourceSnapshot::from_path(&path).expect("snapshot loads");
    assert_eq!(snapshot.managed_clusters.len(), 1);
    assert!(!snapshot.managed_clusters[0].is_available());
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("snapshot.txt");
    fs::write(&path, "{}").expect("write snapshot");
    let err = ResourceSnapshot::from_path(&path).expect_err("unsupported format");
    assert!(matches!(err, ModelError::UnsupportedFormat(_)));
}

#[test]
fn reports_missing_file() {
    let dir = tempdir().expect("temp dir");
    let err = ResourceSnapshot::from_path(&dir.path().join("absent.yaml"))
        .expect_err("missing file");
    assert!(matches!(err, ModelError::Io { .. }));
}
