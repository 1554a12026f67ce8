//! ---
//! dr_section: "03-logging"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Structured logging context for DR decisions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Decision-scoped logging helpers.
#![warn(missing_docs)]

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for tests and development.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Application the decision is made for.
    pub application: Option<&'a str>,
    /// Namespace of the application or DRPC.
    pub namespace: Option<&'a str>,
    /// Requested DR action (failover, relocate).
    pub action: Option<&'a str>,
    /// Cluster the decision concerns.
    pub cluster: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an application name.
    pub fn with_application(mut self, application: &'a str) -> Self {
        self.application = Some(application);
        self
    }

    /// Attach a namespace.
    pub fn with_namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Attach the requested action.
    pub fn with_action(mut self, action: &'a str) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach a cluster name.
    pub fn with_cluster(mut self, cluster: &'a str) -> Self {
        self.cluster = Some(cluster);
        self
    }
}

/// Outcome of a gating decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The action may proceed.
    Allowed,
    /// The action is blocked by at least one check.
    Blocked,
}

impl DecisionOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            DecisionOutcome::Allowed => "allowed",
            DecisionOutcome::Blocked => "blocked",
        }
    }
}

/// Emit a standardized decision event with an allowed/blocked outcome.
pub fn log_decision_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: DecisionOutcome,
) {
    let default_ctx = LogContext::default();
    let ctx = context.unwrap_or(&default_ctx);
    // `event!` needs a constant level.
    match outcome {
        DecisionOutcome::Blocked => tracing::event!(
            Level::WARN,
            event,
            outcome = outcome.as_str(),
            application = ctx.application.unwrap_or(""),
            namespace = ctx.namespace.unwrap_or(""),
            action = ctx.action.unwrap_or(""),
            cluster = ctx.cluster.unwrap_or(""),
            message = %message
        ),
        DecisionOutcome::Allowed => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            application = ctx.application.unwrap_or(""),
            namespace = ctx.namespace.unwrap_or(""),
            action = ctx.action.unwrap_or(""),
            cluster = ctx.cluster.unwrap_or(""),
            message = %message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_emit_without_panic() {
        init();
        let ctx = LogContext::new()
            .with_application("busybox")
            .with_cluster("west");
        dr_info!(context = ctx.clone(), "target selected");
        dr_debug!("checking fencing");
        dr_warn!(context = ctx, "blocked by priority {}", 9);
    }

    #[test]
    fn decision_event_helper_emits() {
        init();
        let ctx = LogContext::new().with_action("failover");
        log_decision_event(
            Some(&ctx),
            "target.validated",
            "target eligible",
            DecisionOutcome::Allowed,
        );
        log_decision_event(
            None,
            "target.validated",
            "target unavailable",
            DecisionOutcome::Blocked,
        );
    }
}
