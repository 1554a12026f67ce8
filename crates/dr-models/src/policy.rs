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

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

/// A DR policy always pairs exactly two clusters.
pub const MAX_ALLOWED_CLUSTERS: usize = 2;

/// `ramendr.openshift.io/v1alpha1` DRPolicy.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrPolicy {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DrPolicySpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DrPolicyStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrPolicySpec {
    #[serde(default)]
    pub dr_clusters: Vec<String>,
    #[serde(default)]
    pub scheduling_interval: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrPolicyStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl DrPolicy {
    pub fn new(name: impl Into<String>, clusters: [&str; MAX_ALLOWED_CLUSTERS]) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: DrPolicySpec {
                dr_clusters: clusters.iter().map(|c| (*c).to_owned()).collect(),
                scheduling_interval: String::new(),
            },
            status: None,
        }
    }

    pub fn with_scheduling_interval(mut self, interval: impl Into<String>) -> Self {
        self.spec.scheduling_interval = interval.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn clusters(&self) -> &[String] {
        &self.spec.dr_clusters
    }

    pub fn contains_cluster(&self, name: &str) -> bool {
        self.spec.dr_clusters.iter().any(|cluster| cluster == name)
    }

    /// Reports the cluster cardinality invariant.
    pub fn is_valid(&self) -> bool {
        self.spec.dr_clusters.len() == MAX_ALLOWED_CLUSTERS
    }

    /// The policy cluster that is not `name`, when the policy is well formed.
    pub fn peer_of(&self, name: &str) -> Option<&str> {
        if !self.contains_cluster(name) {
            return None;
        }
        self.spec
            .dr_clusters
            .iter()
            .find(|cluster| cluster.as_str() != name)
            .map(String::as_str)
    }

    /// Parse `schedulingInterval` (`<n>m`, `<n>h` or `<n>d`).
    ///
    /// Sync policies leave the interval empty, which yields `None`.
    pub fn scheduling_interval(&self) -> Option<Duration> {
        parse_scheduling_interval(&self.spec.scheduling_interval)
    }
}

pub fn parse_scheduling_interval(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (unit_start, _) = raw.char_indices().last()?;
    let (value, unit) = raw.split_at(unit_start);
    let value: i64 = value.parse().ok().filter(|v| *v > 0)?;
    match unit {
        "m" => Duration::try_minutes(value),
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        _ => None,
    }
}

/// Fencing phase reported on a DRCluster.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum FencingPhase {
    Fenced,
    Unfenced,
    Available,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FencingPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FencingPhase::Fenced => "Fenced",
            FencingPhase::Unfenced => "Unfenced",
            FencingPhase::Available => "Available",
            FencingPhase::Unknown => "Unknown",
        }
    }

    /// Storage access is open on the cluster.
    pub fn is_unfenced(&self) -> bool {
        matches!(self, FencingPhase::Unfenced | FencingPhase::Available)
    }
}

impl fmt::Display for FencingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ramendr.openshift.io/v1alpha1` DRCluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrCluster {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DrClusterSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DrClusterStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrClusterStatus {
    #[serde(default)]
    pub phase: FencingPhase,
}

impl DrCluster {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::named(name),
            spec: DrClusterSpec {
                region: Some(region.into()),
            },
            status: None,
        }
    }

    pub fn with_phase(mut self, phase: FencingPhase) -> Self {
        self.status = Some(DrClusterStatus { phase });
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn region(&self) -> Option<&str> {
        self.spec.region.as_deref()
    }

    /// Current fencing phase; a cluster without status reports `Unknown`.
    pub fn phase(&self) -> FencingPhase {
        self.status
            .as_ref()
            .map(|status| status.phase)
            .unwrap_or_default()
    }
}

/// Replication mode derived from the regions of the policy's clusters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplicationType {
    Sync,
    Async,
}

impl ReplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicationType::Sync => "SYNC",
            ReplicationType::Async => "ASYNC",
        }
    }
}

impl fmt::Display for ReplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
