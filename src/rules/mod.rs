//! Built-in rules, grouped by family.

pub mod bounds;
pub mod formats;
pub mod kinds;
pub mod predicates;
pub mod presence;
pub mod temporal;

use std::fmt;
use std::sync::Arc;

use crate::enums::{Bound, Presence, Temporal};
use crate::error::Result;
use crate::rule::{MessageFields, Rule, RuleContext, Verdict};
use crate::types::Value;

/// Every built-in rule, in registration order.
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    let mut rules: Vec<Arc<dyn Rule>> = Presence::ALL
        .into_iter()
        .map(|p| Arc::new(presence::PresenceRule::new(p)) as Arc<dyn Rule>)
        .collect();

    rules.extend(kinds::rules());
    rules.extend(
        [Bound::Min, Bound::Max, Bound::Exact]
            .map(|b| Arc::new(bounds::BoundRule::new(b)) as Arc<dyn Rule>),
    );
    rules.extend(formats::rules());
    rules.push(Arc::new(temporal::DateTimeRule));
    rules.extend(
        [
            Temporal::Before,
            Temporal::BeforeOrEqual,
            Temporal::After,
            Temporal::AfterOrEqual,
        ]
        .map(|t| Arc::new(temporal::TemporalRule::new(t)) as Arc<dyn Rule>),
    );
    rules
}

/// A parameterless rule that checks the value alone.
#[derive(Clone, Copy)]
pub struct PredicateRule {
    name: &'static str,
    message: &'static str,
    stop: bool,
    check: fn(&Value) -> bool,
}

impl PredicateRule {
    pub const fn new(name: &'static str, message: &'static str, check: fn(&Value) -> bool) -> Self {
        Self {
            name,
            message,
            stop: false,
            check,
        }
    }

    pub const fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }
}

impl fmt::Debug for PredicateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRule")
            .field("name", &self.name)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl Rule for PredicateRule {
    fn name(&self) -> &str {
        self.name
    }

    fn stop(&self) -> bool {
        self.stop
    }

    fn message(&self) -> &str {
        self.message
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        _parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        Ok(Verdict::check(
            value.is_some_and(self.check),
            self.message,
            MessageFields::for_field(field),
        ))
    }
}
