//! ---
//! dr_section: "06-target-validation"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Target cluster eligibility, readiness checks and modal state."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Decides whether a failover or relocate may target a given cluster.
//!
//! Domain failures are values: every check returns an optional
//! [`ErrorMessage`] whose priority decides whether it blocks the action.

pub mod errors;
pub mod readiness;
pub mod reducer;
pub mod target;

pub use errors::{
    evaluate_error_message, first_blocking, ErrorMessage, ErrorMessageType, Severity,
    SUPPRESSED_PRIORITY, WARNING_PRIORITY_THRESHOLD,
};
pub use readiness::{
    check_shared_placement, check_volume_sync_delay, validate_dr_policy, validate_peer_readiness,
    validate_subscription_groups, SyncDelayPolicy,
};
pub use reducer::{reduce, Action, ErrorSlot, ErrorSlots, State};
pub use target::{
    validate_managed_clusters, validate_target_cluster, ClusterInfo, TargetClusterType,
    TargetSelection, TargetValidationContext,
};
