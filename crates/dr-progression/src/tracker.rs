//! ---
//! dr_section: "07-action-progression"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Progression string to step mapping for in-flight DR actions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use dr_models::DrpcPhase;

use crate::flows::Flow;
use crate::steps::{derive_steps, is_completed, ProgressionStep};

/// Session-scoped derivation that latches completion.
///
/// Once a `Completed` phase or progression has been observed, later reports
/// keep every step completed.
#[derive(Debug, Clone)]
pub struct ProgressionTracker {
    flow: Flow,
    completed: bool,
}

impl ProgressionTracker {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            completed: false,
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn observe(&mut self, progression: Option<&str>, phase: DrpcPhase) -> Vec<ProgressionStep> {
        self.completed |= is_completed(progression, phase);
        let phase = if self.completed {
            DrpcPhase::Completed
        } else {
            phase
        };
        derive_steps(progression, phase, self.flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::StepStatus;

    #[test]
    fn completion_is_sticky() {
        let mut tracker = ProgressionTracker::new(Flow::Failover);
        let steps = tracker.observe(Some("FailingOverToCluster"), DrpcPhase::FailingOver);
        assert_eq!(steps[1].status, StepStatus::InProgress);

        tracker.observe(None, DrpcPhase::Completed);
        assert!(tracker.is_completed());

        let stale = tracker.observe(Some("WaitForFencing"), DrpcPhase::FailingOver);
        assert!(stale.iter().all(|s| s.status == StepStatus::Completed));
    }
}
