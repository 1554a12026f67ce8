//! ---
//! dr_section: "06-target-validation"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Target cluster eligibility, readiness checks and modal state."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Pure state transitions of the action modal.

use dr_models::DrActionType;
use serde::Serialize;

use crate::errors::ErrorMessage;
use crate::target::TargetClusterType;

/// Independent message slots; each holds at most one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorSlot {
    TargetCluster,
    ManagedClusters,
    DrPolicyControlState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSlots {
    pub target_cluster: Option<ErrorMessage>,
    pub managed_clusters: Option<ErrorMessage>,
    pub dr_policy_control_state: Option<ErrorMessage>,
}

impl ErrorSlots {
    pub fn get(&self, slot: ErrorSlot) -> Option<&ErrorMessage> {
        match slot {
            ErrorSlot::TargetCluster => self.target_cluster.as_ref(),
            ErrorSlot::ManagedClusters => self.managed_clusters.as_ref(),
            ErrorSlot::DrPolicyControlState => self.dr_policy_control_state.as_ref(),
        }
    }

    fn set(&mut self, slot: ErrorSlot, message: Option<ErrorMessage>) {
        match slot {
            ErrorSlot::TargetCluster => self.target_cluster = message,
            ErrorSlot::ManagedClusters => self.managed_clusters = message,
            ErrorSlot::DrPolicyControlState => self.dr_policy_control_state = message,
        }
    }

    /// Most severe message across all slots.
    pub fn most_severe(&self) -> Option<&ErrorMessage> {
        [
            self.target_cluster.as_ref(),
            self.managed_clusters.as_ref(),
            self.dr_policy_control_state.as_ref(),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|message| message.priority)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub action_type: Option<DrActionType>,
    pub selected_target_cluster: TargetClusterType,
    pub selected_subscription_groups: Vec<String>,
    pub errors: ErrorSlots,
    pub modal_footer_message: Option<String>,
}

impl State {
    /// No blocking message in any slot.
    pub fn can_initiate(&self) -> bool {
        self.action_type.is_some()
            && !self
                .errors
                .most_severe()
                .is_some_and(ErrorMessage::is_blocking)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetActionType(DrActionType),
    /// Replaces the whole selection.
    SetSelectedTargetCluster(TargetClusterType),
    SetErrorMessage {
        slot: ErrorSlot,
        message: Option<ErrorMessage>,
    },
    SetModalFooterMessage(Option<String>),
    SetSelectedSubscriptionGroups(Vec<String>),
    Reset,
}

pub fn reduce(state: State, action: Action) -> State {
    match action {
        Action::SetActionType(action_type) => {
            let mut errors = state.errors;
            errors.set(ErrorSlot::TargetCluster, None);
            State {
                action_type: Some(action_type),
                selected_target_cluster: TargetClusterType::default(),
                errors,
                ..state
            }
        }
        Action::SetSelectedTargetCluster(cluster) => State {
            selected_target_cluster: cluster,
            ..state
        },
        Action::SetErrorMessage { slot, message } => {
            let mut errors = state.errors;
            errors.set(slot, message);
            State { errors, ..state }
        }
        Action::SetModalFooterMessage(message) => State {
            modal_footer_message: message,
            ..state
        },
        Action::SetSelectedSubscriptionGroups(groups) => State {
            selected_subscription_groups: groups,
            ..state
        },
        Action::Reset => State::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorMessageType;
    use crate::target::ClusterInfo;

    fn cluster(name: &str, available: bool) -> TargetClusterType {
        TargetClusterType {
            cluster_info: ClusterInfo {
                name: name.into(),
                namespace: name.into(),
            },
            is_cluster_available: available,
            last_available_time: None,
        }
    }

    #[test]
    fn target_selection_is_overwritten_not_merged() {
        let state = reduce(
            State::default(),
            Action::SetSelectedTargetCluster(cluster("east", true)),
        );
        let state = reduce(state, Action::SetSelectedTargetCluster(cluster("west", false)));
        assert_eq!(state.selected_target_cluster, cluster("west", false));
    }

    #[test]
    fn slots_are_independent() {
        let down = ErrorMessage::new(ErrorMessageType::ManagedClustersAreDown, &["sync"]);
        let fenced = ErrorMessage::new(ErrorMessageType::SourceClusterNotFenced, &["east"]);
        let state = reduce(
            State::default(),
            Action::SetErrorMessage {
                slot: ErrorSlot::ManagedClusters,
                message: Some(down.clone()),
            },
        );
        let state = reduce(
            state,
            Action::SetErrorMessage {
                slot: ErrorSlot::TargetCluster,
                message: Some(fenced.clone()),
            },
        );
        assert_eq!(state.errors.get(ErrorSlot::ManagedClusters), Some(&down));
        assert_eq!(state.errors.get(ErrorSlot::TargetCluster), Some(&fenced));
        assert_eq!(state.errors.most_severe(), Some(&down));

        let state = reduce(
            state,
            Action::SetErrorMessage {
                slot: ErrorSlot::ManagedClusters,
                message: None,
            },
        );
        assert!(state.errors.get(ErrorSlot::ManagedClusters).is_none());
        assert_eq!(state.errors.get(ErrorSlot::TargetCluster), Some(&fenced));
    }

    #[test]
    fn changing_action_clears_target() {
        let state = reduce(State::default(), Action::SetActionType(DrActionType::Failover));
        let state = reduce(state, Action::SetSelectedTargetCluster(cluster("west", true)));
        let state = reduce(
            state,
            Action::SetErrorMessage {
                slot: ErrorSlot::TargetCluster,
                message: Some(ErrorMessage::new(
                    ErrorMessageType::TargetClusterNotUnfenced,
                    &["west"],
                )),
            },
        );
        let state = reduce(
            state,
            Action::SetSelectedSubscriptionGroups(vec!["busybox-placement".into()]),
        );
        assert!(!state.can_initiate());

        let state = reduce(state, Action::SetActionType(DrActionType::Relocate));
        assert_eq!(state.action_type, Some(DrActionType::Relocate));
        assert_eq!(state.selected_target_cluster, TargetClusterType::default());
        assert!(state.errors.target_cluster.is_none());
        assert_eq!(state.selected_subscription_groups.len(), 1);
        assert!(state.can_initiate());
    }

    #[test]
    fn warnings_do_not_block_and_reset_clears() {
        let state = reduce(State::default(), Action::SetActionType(DrActionType::Failover));
        let state = reduce(
            state,
            Action::SetErrorMessage {
                slot: ErrorSlot::DrPolicyControlState,
                message: Some(ErrorMessage::new(
                    ErrorMessageType::VolumeSyncDelay,
                    &["busybox-drpc", "40", "15"],
                )),
            },
        );
        let state = reduce(
            state,
            Action::SetModalFooterMessage(Some("Failover initiated".into())),
        );
        assert!(state.can_initiate());
        assert_eq!(reduce(state, Action::Reset), State::default());
    }
}
