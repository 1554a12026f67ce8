//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Read-only shapes of the Kubernetes resources the decision core consumes.
//!
//! Every type deserializes directly from the camelCase JSON/YAML the API
//! server returns; only the fields the decision logic reads are modelled.

pub mod application;
pub mod cluster;
pub mod drpc;
pub mod error;
pub mod meta;
pub mod policy;
pub mod snapshot;

pub use application::{
    Application, ClusterDecision, LabelSelector, MatchExpression, Placement, PlacementDecision,
    PlacementKind, PlacementRule, SelectorOperator, Subscription,
};
pub use cluster::ManagedCluster;
pub use drpc::{DrActionType, DrPlacementControl, DrpcPhase};
pub use error::{ModelError, Result};
pub use meta::{find_condition, Condition, ConditionStatus, ObjectMeta, ObjectReference};
pub use policy::{
    parse_scheduling_interval, DrCluster, DrPolicy, FencingPhase, ReplicationType,
    MAX_ALLOWED_CLUSTERS,
};
pub use snapshot::ResourceSnapshot;

/// Scheduler name marking a PlacementRule as managed by the DR orchestrator.
pub const DR_SCHEDULER_NAME: &str = "ramen";

/// Condition type carrying managed cluster availability.
pub const MANAGED_CLUSTER_CONDITION_AVAILABLE: &str = "ManagedClusterConditionAvailable";

/// Annotation placed on a generic Placement handed over to the DR orchestrator.
pub const PLACEMENT_SCHEDULING_DISABLE_ANNOTATION: &str =
    "cluster.open-cluster-management.io/experimental-scheduling-disable";

/// Label linking a PlacementDecision to its Placement.
pub const PLACEMENT_LABEL: &str = "cluster.open-cluster-management.io/placement";
