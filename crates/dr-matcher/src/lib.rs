//! ---
//! dr_section: "04-subscription-matching"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Application to subscription and placement resolution."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Resolves which subscriptions and placements belong to an application and
//! are scheduled by the DR orchestrator.
//!
//! Missing intermediate resources never produce errors: an empty result means
//! the application is not DR-protected.

mod selector;
mod subscriptions;

pub use selector::{match_application_to_subscription, match_expression};
pub use subscriptions::{
    applications_sharing_placement, filter_dr_subscriptions,
    filter_dr_subscriptions_with_placements, get_app_dr_info, get_app_dr_info_with_placements,
    ApplicationDrInfo, DrSubscriptionMap, PlacementIndex,
};
