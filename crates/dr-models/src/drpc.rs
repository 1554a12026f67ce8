//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::meta::{find_condition, Condition, ObjectMeta, ObjectReference};

/// Action requested on a DRPlacementControl.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum DrActionType {
    Failover,
    Relocate,
}

impl DrActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrActionType::Failover => "Failover",
            DrActionType::Relocate => "Relocate",
        }
    }
}

impl fmt::Display for DrActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrActionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "failover" => Ok(DrActionType::Failover),
            "relocate" => Ok(DrActionType::Relocate),
            _ => Err(ModelError::UnknownAction(s.to_owned())),
        }
    }
}

/// `status.phase` values written by the DR controller.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum DrpcPhase {
    Initiating,
    Deploying,
    Deployed,
    FailingOver,
    FailedOver,
    Relocating,
    Relocated,
    WaitForUser,
    Deleting,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// `ramendr.openshift.io/v1alpha1` DRPlacementControl.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrPlacementControl {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DrpcSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DrpcStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrpcSpec {
    #[serde(default)]
    pub dr_policy_ref: ObjectReference,
    #[serde(default)]
    pub placement_ref: ObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<DrActionType>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrpcStatus {
    #[serde(default)]
    pub phase: DrpcPhase,
    /// Free-form progression written by the controller; treated as an open string.
    #[serde(default, alias = "currentProgression", skip_serializing_if = "Option::is_none")]
    pub progression: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_group_sync_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_conditions: Option<ResourceConditions>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_meta: Option<ResourceMeta>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceMeta {
    #[serde(default)]
    pub protectedpvcs: Vec<String>,
}

impl DrPlacementControl {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        policy: impl Into<String>,
        placement: impl Into<String>,
    ) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(name, namespace),
            spec: DrpcSpec {
                dr_policy_ref: ObjectReference {
                    name: policy.into(),
                    ..ObjectReference::default()
                },
                placement_ref: ObjectReference {
                    kind: Some("PlacementRule".to_owned()),
                    name: placement.into(),
                    namespace: None,
                },
                ..DrpcSpec::default()
            },
            status: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace()
    }

    pub fn policy_name(&self) -> &str {
        &self.spec.dr_policy_ref.name
    }

    pub fn placement_name(&self) -> &str {
        &self.spec.placement_ref.name
    }

    pub fn status_mut(&mut self) -> &mut DrpcStatus {
        self.status.get_or_insert_with(DrpcStatus::default)
    }

    pub fn phase(&self) -> DrpcPhase {
        self.status
            .as_ref()
            .map(|status| status.phase)
            .unwrap_or_default()
    }

    pub fn progression(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.progression.as_deref())
    }

    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|status| status.conditions.as_slice())
            .unwrap_or_default()
    }

    pub fn condition(&self, type_: &str) -> Option<&Condition> {
        find_condition(self.conditions(), type_)
    }

    pub fn last_group_sync_time(&self) -> Option<DateTime<Utc>> {
        self.status
            .as_ref()
            .and_then(|status| status.last_group_sync_time)
    }

    pub fn protected_pvcs(&self) -> &[String] {
        self.status
            .as_ref()
            .and_then(|status| status.resource_conditions.as_ref())
            .and_then(|conditions| conditions.resource_meta.as_ref())
            .map(|meta| meta.protectedpvcs.as_slice())
            .unwrap_or_default()
    }
}
