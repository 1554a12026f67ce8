//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::meta::{ObjectMeta, ObjectReference};
use crate::{PLACEMENT_LABEL, PLACEMENT_SCHEDULING_DISABLE_ANNOTATION};

/// Operators accepted in an application's subscription selector.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchExpression {
    pub key: String,
    pub operator: SelectorOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl MatchExpression {
    pub fn new(key: impl Into<String>, operator: SelectorOperator, values: Option<&[&str]>) -> Self {
        Self {
            key: key.into(),
            operator,
            values: values.map(|values| values.iter().map(|v| (*v).to_owned()).collect()),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default)]
    pub match_expressions: Vec<MatchExpression>,
}

/// `app.k8s.io/v1beta1` Application.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ApplicationSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

impl Application {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        expressions: Vec<MatchExpression>,
    ) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(name, namespace),
            spec: ApplicationSpec {
                selector: Some(LabelSelector {
                    match_expressions: expressions,
                }),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn match_expressions(&self) -> &[MatchExpression] {
        self.spec
            .selector
            .as_ref()
            .map(|selector| selector.match_expressions.as_slice())
            .unwrap_or_default()
    }
}

/// Kind of placement a subscription points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    PlacementRule,
    Placement,
}

impl PlacementKind {
    /// Resolve a reference kind; references without a kind are PlacementRules.
    pub fn from_reference(reference: &ObjectReference) -> Option<Self> {
        match reference.kind.as_deref() {
            None | Some("PlacementRule") => Some(PlacementKind::PlacementRule),
            Some("Placement") => Some(PlacementKind::Placement),
            Some(_) => None,
        }
    }
}

/// `apps.open-cluster-management.io/v1` Subscription.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: SubscriptionSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<SubscriptionPlacement>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_ref: Option<ObjectReference>,
}

impl Subscription {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(name, namespace),
            spec: SubscriptionSpec::default(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_placement(mut self, kind: PlacementKind, name: impl Into<String>) -> Self {
        let kind = match kind {
            PlacementKind::PlacementRule => "PlacementRule",
            PlacementKind::Placement => "Placement",
        };
        self.spec.placement = Some(SubscriptionPlacement {
            placement_ref: Some(ObjectReference {
                kind: Some(kind.to_owned()),
                name: name.into(),
                namespace: None,
            }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn placement_ref(&self) -> Option<&ObjectReference> {
        self.spec
            .placement
            .as_ref()
            .and_then(|placement| placement.placement_ref.as_ref())
    }
}

/// One scheduling decision of a placement.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDecision {
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `apps.open-cluster-management.io/v1` PlacementRule.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRule {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PlacementRuleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlacementRuleStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRuleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRuleStatus {
    #[serde(default)]
    pub decisions: Vec<ClusterDecision>,
}

impl PlacementRule {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(name, namespace),
            ..Self::default()
        }
    }

    pub fn with_scheduler(mut self, scheduler: impl Into<String>) -> Self {
        self.spec.scheduler_name = Some(scheduler.into());
        self
    }

    pub fn with_decision(mut self, cluster: impl Into<String>) -> Self {
        self.status
            .get_or_insert_with(PlacementRuleStatus::default)
            .decisions
            .push(ClusterDecision {
                cluster_name: cluster.into(),
                ..ClusterDecision::default()
            });
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn is_scheduled_by(&self, scheduler: &str) -> bool {
        self.spec.scheduler_name.as_deref() == Some(scheduler)
    }

    /// Cluster named by the first decision.
    pub fn decided_cluster(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.decisions.first())
            .map(|decision| decision.cluster_name.as_str())
    }
}

/// `cluster.open-cluster-management.io/v1beta1` Placement.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

impl Placement {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(name, namespace),
        }
    }

    /// Hand the placement over to the DR orchestrator.
    pub fn with_scheduling_disabled(mut self) -> Self {
        self.metadata.annotations.insert(
            PLACEMENT_SCHEDULING_DISABLE_ANNOTATION.to_owned(),
            "true".to_owned(),
        );
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Scheduling of the placement is delegated to the DR orchestrator.
    pub fn is_dr_scheduled(&self) -> bool {
        self.metadata
            .annotations
            .get(PLACEMENT_SCHEDULING_DISABLE_ANNOTATION)
            .map(|value| value == "true")
            .unwrap_or(false)
    }
}

/// `cluster.open-cluster-management.io/v1beta1` PlacementDecision.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDecision {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlacementDecisionStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDecisionStatus {
    #[serde(default)]
    pub decisions: Vec<ClusterDecision>,
}

impl PlacementDecision {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        placement: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        let mut metadata = ObjectMeta::namespaced(name, namespace);
        metadata
            .labels
            .insert(PLACEMENT_LABEL.to_owned(), placement.into());
        Self {
            metadata,
            status: Some(PlacementDecisionStatus {
                decisions: vec![ClusterDecision {
                    cluster_name: cluster.into(),
                    ..ClusterDecision::default()
                }],
            }),
        }
    }

    /// Name of the placement this decision belongs to.
    pub fn placement_name(&self) -> Option<&str> {
        self.metadata.labels.get(PLACEMENT_LABEL).map(String::as_str)
    }

    pub fn decided_cluster(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.decisions.first())
            .map(|decision| decision.cluster_name.as_str())
    }
}
