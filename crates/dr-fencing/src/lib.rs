//! ---
//! dr_section: "05-replication-fencing"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Replication type derivation and fencing precondition checks."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Replication and fencing evaluation for the two clusters of a DR policy.

mod fencing;
mod origin;
mod replication;

pub use fencing::{validate_fencing, FencingVerdict, FencingViolation};
pub use origin::find_origin_cluster;
pub use replication::get_replication_type_using_dr_clusters;
