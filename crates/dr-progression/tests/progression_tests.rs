//! ---
//! dr_section: "07-action-progression"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Progression string to step mapping for in-flight DR actions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{DrActionType, DrPlacementControl};
use dr_progression::{progression_view, ProgressionInput, StepLabel, StepStatus};

fn drpc_from_yaml(yaml: &str) -> DrPlacementControl {
    serde_yaml::from_str(yaml).expect("drpc parses")
}

#[test]
fn empty_failover_progression_is_preparing() {
    let drpc = drpc_from_yaml(
        r#"
metadata: { name: busybox-drpc, namespace: busybox }
spec:
  drPolicyRef: { name: sync-policy }
  placementRef: { kind: PlacementRule, name: busybox-placement }
  action: Failover
status:
  phase: FailingOver
"#,
    );
    let view = progression_view(ProgressionInput {
        action: DrActionType::Failover,
        drpc: &drpc,
        is_discovered: false,
        origin_cluster: Some("east"),
    });
    assert_eq!(view.steps[0].label, StepLabel::Preparing);
    assert_eq!(view.steps[0].status, StepStatus::InProgress);
    assert_eq!(view.completed, 0);
    assert_eq!(view.total, 4);
}

#[test]
fn discovered_cleanup_directly_follows_preparing() {
    let drpc = drpc_from_yaml(
        r#"
metadata: { name: discovered-drpc, namespace: openshift-dr-ops }
status:
  phase: Relocating
  progression: WaitOnUserToCleanUp
"#,
    );
    let view = progression_view(ProgressionInput {
        action: DrActionType::Relocate,
        drpc: &drpc,
        is_discovered: true,
        origin_cluster: Some("west"),
    });
    assert_eq!(view.steps[1].label, StepLabel::CleanUp);
    assert_eq!(view.steps[1].status, StepStatus::InProgress);
    assert_eq!(view.current, Some(StepLabel::CleanUp));

    let plain = progression_view(ProgressionInput {
        action: DrActionType::Relocate,
        drpc: &drpc,
        is_discovered: false,
        origin_cluster: Some("west"),
    });
    assert_eq!(plain.current, Some(StepLabel::CleanUp));
    assert_eq!(plain.completed, 3);
}

#[test]
fn completed_phase_marks_every_step() {
    let drpc = drpc_from_yaml(
        r#"
metadata: { name: busybox-drpc, namespace: busybox }
status:
  phase: Completed
  currentProgression: WaitForFencing
"#,
    );
    let view = progression_view(ProgressionInput {
        action: DrActionType::Failover,
        drpc: &drpc,
        is_discovered: false,
        origin_cluster: None,
    });
    assert_eq!(view.completed, view.total);

    let rendered = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(rendered["steps"][3]["label"], "Clean up");
    assert_eq!(rendered["steps"][3]["status"], "Completed");
    assert_eq!(rendered["flow"], "failover");
}
