//! ---
//! dr_section: "15-testing-qa"
//! dr_subsection: "integration-tests"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Integration and validation tests for the DR decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_fencing::get_replication_type_using_dr_clusters;
use dr_matcher::match_application_to_subscription;
use dr_models::{
    Application, ConditionStatus, DrActionType, DrCluster, DrpcPhase, FencingPhase,
    ManagedCluster, MatchExpression, ReplicationType, SelectorOperator, Subscription,
};
use dr_progression::{derive_steps, select_flow, Flow, StepLabel, StepStatus};
use dr_targeting::{validate_target_cluster, ErrorMessageType, TargetValidationContext};

#[test]
fn matcher_requires_every_expression() {
    let subscription = Subscription::new("busybox-sub", "busybox")
        .with_label("app", "busybox")
        .with_label("tier", "frontend");
    let no_expressions = Application::new("busybox", "busybox", Vec::new());
    assert!(match_application_to_subscription(&subscription, &no_expressions));

    let all_hold = Application::new(
        "busybox",
        "busybox",
        vec![
            MatchExpression::new("app", SelectorOperator::In, Some(&["busybox"])),
            MatchExpression::new("tier", SelectorOperator::Exists, None),
            MatchExpression::new("legacy", SelectorOperator::DoesNotExist, None),
        ],
    );
    assert!(match_application_to_subscription(&subscription, &all_hold));

    let one_fails = Application::new(
        "busybox",
        "busybox",
        vec![
            MatchExpression::new("app", SelectorOperator::In, Some(&["busybox"])),
            MatchExpression::new("tier", SelectorOperator::NotIn, Some(&["frontend"])),
        ],
    );
    assert!(!match_application_to_subscription(&subscription, &one_fails));
}

#[test]
fn regions_decide_replication() {
    let same = [DrCluster::new("east", "us-e"), DrCluster::new("west", "us-e")];
    let split = [DrCluster::new("east", "us-e"), DrCluster::new("west", "us-w")];
    assert_eq!(get_replication_type_using_dr_clusters(&same), ReplicationType::Sync);
    assert_eq!(get_replication_type_using_dr_clusters(&split), ReplicationType::Async);
    assert_eq!(get_replication_type_using_dr_clusters(&same[..1]), ReplicationType::Sync);
    assert_eq!(get_replication_type_using_dr_clusters(&[]), ReplicationType::Sync);
}

#[test]
fn progression_derivation_is_idempotent_and_tolerant() {
    for flow in [Flow::Failover, Flow::Relocate, Flow::DiscoveredRelocate] {
        let first = derive_steps(Some("NotARealProgression"), DrpcPhase::Unknown, flow);
        let second = derive_steps(Some("NotARealProgression"), DrpcPhase::Unknown, flow);
        assert_eq!(first, second);
        assert_eq!(first[0].status, StepStatus::InProgress);
        assert!(first[1..].iter().all(|s| s.status == StepStatus::Pending));
    }
}

#[test]
fn completed_phase_completes_every_step() {
    for progression in [None, Some("RunningFinalSync"), Some("Unheard-of")] {
        let steps = derive_steps(progression, DrpcPhase::Completed, Flow::Relocate);
        assert!(steps.iter().all(|s| s.status == StepStatus::Completed));
    }
}

#[test]
fn availability_error_precedes_fencing_for_relocate() {
    let clusters = [
        DrCluster::new("east", "us-e").with_phase(FencingPhase::Fenced),
        DrCluster::new("west", "us-e").with_phase(FencingPhase::Fenced),
    ];
    let target = ManagedCluster::new("east").with_availability(ConditionStatus::False, None);
    let selection = validate_target_cluster(
        TargetValidationContext::new(DrActionType::Relocate, &target, &clusters).with_origin("west"),
    );
    let error = selection.error.expect("target rejected");
    assert_eq!(error.kind, ErrorMessageType::TargetClusterIsNotAvailable);
    assert!(selection.fencing.is_none());
}

#[test]
fn async_failover_ignores_fencing_phases() {
    let clusters = [
        DrCluster::new("east", "us-e").with_phase(FencingPhase::Unfenced),
        DrCluster::new("west", "us-w").with_phase(FencingPhase::Fenced),
    ];
    let target = ManagedCluster::new("west").with_availability(ConditionStatus::True, None);
    let selection = validate_target_cluster(
        TargetValidationContext::new(DrActionType::Failover, &target, &clusters).with_origin("east"),
    );
    assert!(selection.is_eligible());
    assert!(selection.error.is_none());
}

#[test]
fn sync_failover_surfaces_only_the_fenced_check() {
    let clusters = [
        DrCluster::new("east", "us-e").with_phase(FencingPhase::Unfenced),
        DrCluster::new("west", "us-e").with_phase(FencingPhase::Fenced),
    ];
    let target = ManagedCluster::new("west").with_availability(ConditionStatus::True, None);
    let selection = validate_target_cluster(
        TargetValidationContext::new(DrActionType::Failover, &target, &clusters).with_origin("east"),
    );
    assert_eq!(selection.replication, Some(ReplicationType::Sync));
    assert_eq!(
        selection.error.as_ref().map(|e| e.message.as_str()),
        Some("Source cluster east is not fenced.")
    );
    let candidates: Vec<String> = selection
        .fencing_candidates()
        .into_iter()
        .map(|c| c.message)
        .collect();
    assert!(candidates.contains(&"Target cluster west is not unfenced.".to_owned()));
}

#[test]
fn discovered_relocate_cleanup_is_second_step() {
    let flow = select_flow(DrActionType::Relocate, true);
    let steps = derive_steps(Some("WaitOnUserToCleanUp"), DrpcPhase::Relocating, flow);
    assert_eq!(steps[1].label, StepLabel::CleanUp);
    assert_eq!(steps[1].status, StepStatus::InProgress);
    assert_eq!(steps[0].status, StepStatus::Completed);

    let regular = derive_steps(
        Some("WaitOnUserToCleanUp"),
        DrpcPhase::Relocating,
        select_flow(DrActionType::Relocate, false),
    );
    assert_eq!(regular[3].label, StepLabel::CleanUp);
    assert_eq!(regular[3].status, StepStatus::InProgress);
}

#[test]
fn empty_failover_progression_starts_preparing() {
    let steps = derive_steps(None, DrpcPhase::Initiating, Flow::Failover);
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].label, StepLabel::Preparing);
    assert_eq!(steps[0].status, StepStatus::InProgress);
    let completed = steps
        .iter()
        .filter(|s| s.status == StepStatus::Completed)
        .count();
    assert_eq!(completed, 0);
}
