//! ---
//! dr_section: "04-subscription-matching"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Application to subscription and placement resolution."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::collections::BTreeMap;

use dr_models::{Application, MatchExpression, SelectorOperator, Subscription};

/// Evaluate one selector expression against a label set.
///
/// `Exists` and `DoesNotExist` only hold when the expression carries no
/// `values` list, which is stricter than the upstream label selector.
pub fn match_expression(labels: &BTreeMap<String, String>, expression: &MatchExpression) -> bool {
    let value = labels.get(&expression.key);
    let values = expression.values.as_deref().unwrap_or_default();
    match expression.operator {
        SelectorOperator::In => value.map_or(false, |value| values.contains(value)),
        SelectorOperator::NotIn => value.map_or(true, |value| !values.contains(value)),
        SelectorOperator::Exists => value.is_some() && expression.values.is_none(),
        SelectorOperator::DoesNotExist => value.is_none() && expression.values.is_none(),
        SelectorOperator::Unsupported => false,
    }
}

/// True when every selector expression of the application holds for the subscription.
pub fn match_application_to_subscription(
    subscription: &Subscription,
    application: &Application,
) -> bool {
    application
        .match_expressions()
        .iter()
        .all(|expression| match_expression(&subscription.metadata.labels, expression))
}
