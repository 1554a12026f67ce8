//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meta::{find_condition, Condition, ConditionStatus, ObjectMeta};
use crate::MANAGED_CLUSTER_CONDITION_AVAILABLE;

/// `cluster.open-cluster-management.io/v1` ManagedCluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedCluster {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ManagedClusterStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedClusterStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl ManagedCluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            status: None,
        }
    }

    /// Attach an availability condition with the given status.
    pub fn with_availability(mut self, status: ConditionStatus, at: Option<DateTime<Utc>>) -> Self {
        let mut condition = Condition::new(MANAGED_CLUSTER_CONDITION_AVAILABLE, status);
        condition.last_transition_time = at;
        self.status
            .get_or_insert_with(ManagedClusterStatus::default)
            .conditions
            .push(condition);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|status| status.conditions.as_slice())
            .unwrap_or_default()
    }

    /// The `ManagedClusterConditionAvailable` condition, whatever its status.
    pub fn availability_condition(&self) -> Option<&Condition> {
        find_condition(self.conditions(), MANAGED_CLUSTER_CONDITION_AVAILABLE)
    }

    /// Available when the availability condition reports `True`.
    pub fn is_available(&self) -> bool {
        self.availability_condition()
            .map(Condition::is_true)
            .unwrap_or(false)
    }

    /// Transition time of a `True` availability condition.
    pub fn last_available_time(&self) -> Option<DateTime<Utc>> {
        self.availability_condition()
            .filter(|condition| condition.is_true())
            .and_then(|condition| condition.last_transition_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_requires_true_condition() {
        assert!(!ManagedCluster::new("west").is_available());
        assert!(!ManagedCluster::new("west")
            .with_availability(ConditionStatus::False, None)
            .is_available());
        assert!(ManagedCluster::new("west")
            .with_availability(ConditionStatus::True, None)
            .is_available());
    }

    #[test]
    fn other_condition_types_do_not_count() {
        let cluster: ManagedCluster = serde_json::from_str(
            r#"{"metadata":{"name":"west"},"status":{"conditions":[
                {"type":"ManagedClusterJoined","status":"True"},
                {"type":"HubAcceptedManagedCluster","status":"True"}
            ]}}"#,
        )
        .unwrap();
        assert!(!cluster.is_available());
        assert!(cluster.last_available_time().is_none());
    }
}
