//! Name → rule lookup.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ValidatorError};
use crate::rule::Rule;

/// The rules known to a validator, in registration order.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_builtin_rules() -> Self {
        let rules = crate::rules::builtin_rules()
            .into_iter()
            .map(|rule| (rule.name().to_string(), rule))
            .collect();
        Self { rules }
    }

    /// Registers a rule under its own name.
    ///
    /// # Errors
    ///
    /// `MissingRuleName` for a blank name, `RuleNameAlreadyExists` when the
    /// name is taken.
    pub fn register(&mut self, rule: impl Rule + 'static) -> Result<()> {
        self.register_arc(Arc::new(rule))
    }

    pub fn register_arc(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        let name = rule.name().to_string();
        if name.trim().is_empty() {
            return Err(ValidatorError::MissingRuleName(format!("{:?}", rule)));
        }
        if self.rules.contains_key(&name) {
            return Err(ValidatorError::RuleNameAlreadyExists(name));
        }

        tracing::debug!(
            rule = %name,
            implicit = rule.implicit(),
            stop = rule.stop(),
            "registered rule"
        );
        self.rules.insert(name, rule);
        Ok(())
    }

    /// Registers rules in order, stopping at the first error. Rules before
    /// the failing one stay registered.
    pub fn register_many<I>(&mut self, rules: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn Rule>>,
    {
        rules.into_iter().try_for_each(|rule| self.register_arc(rule))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
