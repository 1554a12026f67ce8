//! ---
//! dr_section: "05-replication-fencing"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Replication type derivation and fencing precondition checks."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{DrCluster, ReplicationType};
use tracing::debug;

/// Clusters sharing one region replicate synchronously, anything else asynchronously.
///
/// Every cluster is compared against the first one. Empty and single-cluster
/// inputs are trivially `Sync`.
pub fn get_replication_type_using_dr_clusters(clusters: &[DrCluster]) -> ReplicationType {
    let Some(first) = clusters.first() else {
        return ReplicationType::Sync;
    };
    let replication = if clusters
        .iter()
        .all(|cluster| cluster.region() == first.region())
    {
        ReplicationType::Sync
    } else {
        ReplicationType::Async
    };
    debug!(clusters = clusters.len(), %replication, "derived replication type");
    replication
}
