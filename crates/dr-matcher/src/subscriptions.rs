//! ---
//! dr_section: "04-subscription-matching"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Application to subscription and placement resolution."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::{
    Application, DrPlacementControl, ObjectReference, Placement, PlacementDecision, PlacementKind,
    PlacementRule, Subscription,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::selector::match_application_to_subscription;

/// Placement name to the names of the DR-scheduled subscriptions using it.
pub type DrSubscriptionMap = IndexMap<String, Vec<String>>;

/// DR protection record for one DRPC governing (part of) an application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDrInfo {
    pub dr_placement_control: DrPlacementControl,
    pub subscriptions: Vec<String>,
    /// Cluster named by the placement's first decision; empty when undecided.
    pub cluster_name: String,
}

/// Read-only view over the placement kinds a subscription may reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementIndex<'a> {
    pub rules: &'a [PlacementRule],
    pub placements: &'a [Placement],
    pub decisions: &'a [PlacementDecision],
}

impl<'a> PlacementIndex<'a> {
    pub fn from_rules(rules: &'a [PlacementRule]) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    fn rule(&self, name: &str, namespace: &str) -> Option<&'a PlacementRule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name && rule.metadata.namespace() == namespace)
    }

    fn placement(&self, name: &str, namespace: &str) -> Option<&'a Placement> {
        self.placements.iter().find(|placement| {
            placement.name() == name && placement.metadata.namespace() == namespace
        })
    }

    /// The referenced placement exists and is handed to the DR scheduler.
    pub fn is_dr_scheduled(
        &self,
        reference: &ObjectReference,
        namespace: &str,
        scheduler_name: &str,
    ) -> bool {
        let namespace = reference.namespace.as_deref().unwrap_or(namespace);
        match PlacementKind::from_reference(reference) {
            Some(PlacementKind::PlacementRule) => self
                .rule(&reference.name, namespace)
                .map_or(false, |rule| rule.is_scheduled_by(scheduler_name)),
            Some(PlacementKind::Placement) => self
                .placement(&reference.name, namespace)
                .map_or(false, Placement::is_dr_scheduled),
            None => false,
        }
    }

    /// Cluster currently decided for the referenced placement.
    pub fn decided_cluster(&self, reference: &ObjectReference, namespace: &str) -> Option<&'a str> {
        let namespace = reference.namespace.as_deref().unwrap_or(namespace);
        match PlacementKind::from_reference(reference)? {
            PlacementKind::PlacementRule => self
                .rule(&reference.name, namespace)
                .and_then(PlacementRule::decided_cluster),
            PlacementKind::Placement => self
                .decisions
                .iter()
                .filter(|decision| decision.metadata.namespace() == namespace)
                .find(|decision| decision.placement_name() == Some(reference.name.as_str()))
                .and_then(PlacementDecision::decided_cluster),
        }
    }
}

/// Group the application's DR-scheduled subscriptions by placement rule name.
pub fn filter_dr_subscriptions(
    application: &Application,
    subscriptions: &[Subscription],
    placement_rules: &[PlacementRule],
    scheduler_name: &str,
) -> DrSubscriptionMap {
    filter_dr_subscriptions_with_placements(
        application,
        subscriptions,
        PlacementIndex::from_rules(placement_rules),
        scheduler_name,
    )
}

/// Same as [`filter_dr_subscriptions`], also resolving generic Placements.
pub fn filter_dr_subscriptions_with_placements(
    application: &Application,
    subscriptions: &[Subscription],
    index: PlacementIndex<'_>,
    scheduler_name: &str,
) -> DrSubscriptionMap {
    let mut grouped = DrSubscriptionMap::new();
    for subscription in subscriptions {
        let Some(reference) = subscription.placement_ref() else {
            continue;
        };
        if !index.is_dr_scheduled(reference, subscription.metadata.namespace(), scheduler_name) {
            continue;
        }
        if !match_application_to_subscription(subscription, application) {
            continue;
        }
        grouped
            .entry(reference.name.clone())
            .or_default()
            .push(subscription.name().to_owned());
    }
    debug!(
        application = application.name(),
        placements = grouped.len(),
        "resolved DR subscriptions"
    );
    grouped
}

/// Join DR subscriptions with the DRPCs referencing their placement rules.
pub fn get_app_dr_info(
    drpcs: &[DrPlacementControl],
    dr_subscriptions: &DrSubscriptionMap,
    placement_rules: &[PlacementRule],
) -> Vec<ApplicationDrInfo> {
    get_app_dr_info_with_placements(
        drpcs,
        dr_subscriptions,
        PlacementIndex::from_rules(placement_rules),
    )
}

/// Same as [`get_app_dr_info`], also resolving generic Placements.
pub fn get_app_dr_info_with_placements(
    drpcs: &[DrPlacementControl],
    dr_subscriptions: &DrSubscriptionMap,
    index: PlacementIndex<'_>,
) -> Vec<ApplicationDrInfo> {
    drpcs
        .iter()
        .filter_map(|drpc| {
            let subscriptions = dr_subscriptions.get(drpc.placement_name())?;
            let cluster_name = index
                .decided_cluster(&drpc.spec.placement_ref, drpc.namespace())
                .unwrap_or_default()
                .to_owned();
            Some(ApplicationDrInfo {
                dr_placement_control: drpc.clone(),
                subscriptions: subscriptions.clone(),
                cluster_name,
            })
        })
        .collect()
}

/// Names of the applications in `namespace` whose DR subscriptions use `placement`.
///
/// Acting on a placement moves every one of these applications together.
pub fn applications_sharing_placement(
    applications: &[Application],
    subscriptions: &[Subscription],
    index: PlacementIndex<'_>,
    scheduler_name: &str,
    namespace: &str,
    placement: &str,
) -> Vec<String> {
    applications
        .iter()
        .filter(|application| application.metadata.namespace() == namespace)
        .filter(|application| {
            filter_dr_subscriptions_with_placements(application, subscriptions, index, scheduler_name)
                .contains_key(placement)
        })
        .map(|application| application.name().to_owned())
        .collect()
}
