//! ---
//! dr_section: "06-target-validation"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Target cluster eligibility, readiness checks and modal state."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fmt;

use dr_fencing::FencingViolation;
use serde::{Deserialize, Serialize};

/// Priorities at or above this value are advisory.
pub const WARNING_PRIORITY_THRESHOLD: i32 = 20;

/// Returned by [`evaluate_error_message`] for a suppressed advisory.
pub const SUPPRESSED_PRIORITY: i32 = -1;

/// Presentation severity derived from a message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the action.
    Danger,
    /// Informs the operator; the action may still run.
    Warning,
}

impl Severity {
    /// Static label for log fields and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalogue of every message the validator can surface.
///
/// The priority is an explicit property of each kind; declaration order
/// carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorMessageType {
    DrIsNotEnabledFailover,
    DrIsNotEnabledRelocate,
    FailoverReadinessCheckFailed,
    RelocateReadinessCheckFailed,
    NoSubscriptionGroupFound,
    PeerIsNotReadyFailover,
    PeerIsNotReadyRelocate,
    ManagedClustersAreDown,
    TargetClusterIsNotAvailable,
    SourceClusterNotFenced,
    TargetClusterNotUnfenced,
    RelocateRequiresUnfenced,
    VolumeSyncDelay,
    OtherApplicationsWillBeFailedOver,
    OtherApplicationsWillBeRelocated,
}

impl ErrorMessageType {
    /// Every kind, in ascending priority.
    pub const ALL: [ErrorMessageType; 15] = [
        ErrorMessageType::DrIsNotEnabledFailover,
        ErrorMessageType::DrIsNotEnabledRelocate,
        ErrorMessageType::FailoverReadinessCheckFailed,
        ErrorMessageType::RelocateReadinessCheckFailed,
        ErrorMessageType::NoSubscriptionGroupFound,
        ErrorMessageType::PeerIsNotReadyFailover,
        ErrorMessageType::PeerIsNotReadyRelocate,
        ErrorMessageType::ManagedClustersAreDown,
        ErrorMessageType::TargetClusterIsNotAvailable,
        ErrorMessageType::SourceClusterNotFenced,
        ErrorMessageType::TargetClusterNotUnfenced,
        ErrorMessageType::RelocateRequiresUnfenced,
        ErrorMessageType::VolumeSyncDelay,
        ErrorMessageType::OtherApplicationsWillBeFailedOver,
        ErrorMessageType::OtherApplicationsWillBeRelocated,
    ];

    /// Lower values are more severe; `< 20` blocks the action.
    pub fn priority(&self) -> i32 {
        match self {
            ErrorMessageType::DrIsNotEnabledFailover => 0,
            ErrorMessageType::DrIsNotEnabledRelocate => 1,
            ErrorMessageType::FailoverReadinessCheckFailed => 2,
            ErrorMessageType::RelocateReadinessCheckFailed => 3,
            ErrorMessageType::NoSubscriptionGroupFound => 4,
            ErrorMessageType::PeerIsNotReadyFailover => 5,
            ErrorMessageType::PeerIsNotReadyRelocate => 6,
            ErrorMessageType::ManagedClustersAreDown => 7,
            ErrorMessageType::TargetClusterIsNotAvailable => 8,
            ErrorMessageType::SourceClusterNotFenced => 9,
            ErrorMessageType::TargetClusterNotUnfenced => 10,
            ErrorMessageType::RelocateRequiresUnfenced => 11,
            ErrorMessageType::VolumeSyncDelay => 20,
            ErrorMessageType::OtherApplicationsWillBeFailedOver => 21,
            ErrorMessageType::OtherApplicationsWillBeRelocated => 22,
        }
    }

    pub fn severity(&self) -> Severity {
        if self.priority() < WARNING_PRIORITY_THRESHOLD {
            Severity::Danger
        } else {
            Severity::Warning
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity() == Severity::Danger
    }

    /// Message template; `{0}`, `{1}`, ... are replaced by positional arguments.
    fn template(&self) -> &'static str {
        match self {
            ErrorMessageType::DrIsNotEnabledFailover => {
                "Disaster recovery is not enabled for {0}. Failover is not possible."
            }
            ErrorMessageType::DrIsNotEnabledRelocate => {
                "Disaster recovery is not enabled for {0}. Relocate is not possible."
            }
            ErrorMessageType::FailoverReadinessCheckFailed => {
                "Failover readiness check failed: {0}"
            }
            ErrorMessageType::RelocateReadinessCheckFailed => {
                "Relocate readiness check failed: {0}"
            }
            ErrorMessageType::NoSubscriptionGroupFound => {
                "No subscription group is selected for {0}."
            }
            ErrorMessageType::PeerIsNotReadyFailover => {
                "Peer cluster of {0} is not ready. Failover cannot start."
            }
            ErrorMessageType::PeerIsNotReadyRelocate => {
                "Peer cluster of {0} is not ready. Relocate cannot start."
            }
            ErrorMessageType::ManagedClustersAreDown => {
                "All managed clusters of policy {0} are down."
            }
            ErrorMessageType::TargetClusterIsNotAvailable => "Target cluster {0} is not available.",
            ErrorMessageType::SourceClusterNotFenced => "Source cluster {0} is not fenced.",
            ErrorMessageType::TargetClusterNotUnfenced => "Target cluster {0} is not unfenced.",
            ErrorMessageType::RelocateRequiresUnfenced => {
                "Clusters {0} must be unfenced before relocating."
            }
            ErrorMessageType::VolumeSyncDelay => {
                "Volume sync for {0} is delayed. Last sync completed {1} minutes ago, expected within {2} minutes."
            }
            ErrorMessageType::OtherApplicationsWillBeFailedOver => {
                "Applications {0} share placement {1} and will also be failed over."
            }
            ErrorMessageType::OtherApplicationsWillBeRelocated => {
                "Applications {0} share placement {1} and will also be relocated."
            }
        }
    }
}

/// A rendered catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub kind: ErrorMessageType,
    pub priority: i32,
    pub severity: Severity,
    pub message: String,
}

impl ErrorMessage {
    /// Render the template of `kind` with positional arguments.
    pub fn new(kind: ErrorMessageType, args: &[&str]) -> Self {
        let message = render_template(kind.template(), args);
        Self {
            kind,
            priority: kind.priority(),
            severity: kind.severity(),
            message,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }
}

/// Single pass over `template`; argument text is never re-scanned. A
/// placeholder without a matching argument is kept verbatim.
fn render_template(template: &str, args: &[&str]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];
        let substituted = tail.find('}').and_then(|close| {
            let index: usize = tail[1..close].parse().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                rendered.push_str(arg);
                rest = &tail[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&FencingViolation> for ErrorMessage {
    fn from(violation: &FencingViolation) -> Self {
        match violation {
            FencingViolation::SourceClusterNotFenced { cluster } => {
                ErrorMessage::new(ErrorMessageType::SourceClusterNotFenced, &[cluster.as_str()])
            }
            FencingViolation::TargetClusterNotUnfenced { cluster } => {
                ErrorMessage::new(ErrorMessageType::TargetClusterNotUnfenced, &[cluster.as_str()])
            }
            FencingViolation::RelocateRequiresUnfenced { clusters } => ErrorMessage::new(
                ErrorMessageType::RelocateRequiresUnfenced,
                &[&clusters.join(" and ")],
            ),
        }
    }
}

/// Effective priority of `kind` for display.
///
/// Blocking kinds keep their priority. Advisory kinds keep theirs only when
/// warnings are requested, otherwise [`SUPPRESSED_PRIORITY`] is returned.
pub fn evaluate_error_message(kind: ErrorMessageType, include_warnings: bool) -> i32 {
    let priority = kind.priority();
    if priority < WARNING_PRIORITY_THRESHOLD || include_warnings {
        priority
    } else {
        SUPPRESSED_PRIORITY
    }
}

/// First blocking message in check order.
pub fn first_blocking<I>(candidates: I) -> Option<ErrorMessage>
where
    I: IntoIterator<Item = ErrorMessage>,
{
    candidates.into_iter().find(ErrorMessage::is_blocking)
}
