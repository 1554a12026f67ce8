//! ---
//! dr_section: "07-action-progression"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Progression string to step mapping for in-flight DR actions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Maps the controller's free-form progression onto a few stable steps.
//!
//! The progression is an open string; unknown values fall back to the first
//! step of the flow instead of failing.

pub mod flows;
pub mod steps;
pub mod tracker;
pub mod view;

pub use flows::{
    select_flow, Flow, FlowEntry, StepLabel, DISCOVERED_RELOCATE_FLOW, FAILOVER_FLOW,
    RELOCATE_FLOW,
};
pub use steps::{
    current_index, derive_steps, is_completed, ProgressionStep, StepStatus, PROGRESSION_COMPLETED,
};
pub use tracker::ProgressionTracker;
pub use view::{progression_view, ProgressionInput, ProgressionView};
