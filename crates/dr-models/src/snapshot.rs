//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{Application, Placement, PlacementDecision, PlacementRule, Subscription};
use crate::cluster::ManagedCluster;
use crate::drpc::DrPlacementControl;
use crate::error::{ModelError, Result};
use crate::policy::{DrCluster, DrPolicy};

/// Point-in-time bundle of every resource kind the decision core reads.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    #[serde(default)]
    pub dr_policies: Vec<DrPolicy>,
    #[serde(default)]
    pub dr_clusters: Vec<DrCluster>,
    #[serde(default)]
    pub dr_placement_controls: Vec<DrPlacementControl>,
    #[serde(default)]
    pub managed_clusters: Vec<ManagedCluster>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub placement_rules: Vec<PlacementRule>,
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub placement_decisions: Vec<PlacementDecision>,
}

impl ResourceSnapshot {
    /// Load a snapshot from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let snapshot = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => return Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        };
        debug!(snapshot = %path.display(), "loaded resource snapshot");
        Ok(snapshot)
    }

    pub fn dr_policy(&self, name: &str) -> Option<&DrPolicy> {
        self.dr_policies.iter().find(|policy| policy.name() == name)
    }

    /// DRClusters referenced by the policy, in policy order.
    pub fn dr_clusters_for(&self, policy: &DrPolicy) -> Vec<DrCluster> {
        policy
            .clusters()
            .iter()
            .filter_map(|name| self.dr_clusters.iter().find(|c| c.name() == name))
            .cloned()
            .collect()
    }

    /// Find a DRPC by name, optionally restricted to a namespace.
    pub fn drpc(&self, name: &str, namespace: Option<&str>) -> Option<&DrPlacementControl> {
        self.dr_placement_controls.iter().find(|drpc| {
            drpc.name() == name && namespace.map_or(true, |ns| drpc.namespace() == ns)
        })
    }

    pub fn managed_cluster(&self, name: &str) -> Option<&ManagedCluster> {
        self.managed_clusters
            .iter()
            .find(|cluster| cluster.name() == name)
    }

    pub fn application(&self, name: &str, namespace: Option<&str>) -> Option<&Application> {
        self.applications.iter().find(|app| {
            app.name() == name && namespace.map_or(true, |ns| app.metadata.namespace() == ns)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_clusters_follow_policy_order() {
        let snapshot = ResourceSnapshot {
            dr_policies: vec![DrPolicy::new("p", ["west", "east"])],
            dr_clusters: vec![DrCluster::new("east", "us-e"), DrCluster::new("west", "us-w")],
            ..ResourceSnapshot::default()
        };
        let policy = snapshot.dr_policy("p").unwrap();
        let names: Vec<_> = snapshot
            .dr_clusters_for(policy)
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, vec!["west", "east"]);
    }
}
