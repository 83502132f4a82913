//! The rule capability: the [`Rule`] trait, the context a rule evaluates in,
//! and inline [`FunctionRule`]s.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::parse::parse_rule_spec;
use crate::primitives::{self, wildcard_form};
use crate::registry::RuleRegistry;
use crate::types::{RuleSet, Value};

/// Message-field key holding the concrete field path.
pub const FIELD_KEY: &str = "field";
/// Message-field key holding the referenced field(s).
pub const OTHER_KEY: &str = "other";
/// Message-field key holding a single displayed value.
pub const VALUE_KEY: &str = "value";
/// Message-field key holding an enumerated value list.
pub const VALUES_KEY: &str = "values";

// ─── Message fields ─────────────────────────────────────────────────────────

/// One placeholder value of a failure message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageValue {
    Text(String),
    /// Displayed joined by `", "`; overrides apply per element.
    List(Vec<String>),
}

impl MessageValue {
    pub fn display(&self) -> String {
        match self {
            MessageValue::Text(s) => s.clone(),
            MessageValue::List(items) => items.join(", "),
        }
    }
}

/// Placeholder values for a failure message, keyed by placeholder name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFields(IndexMap<String, MessageValue>);

impl MessageFields {
    /// Fields holding just the concrete field path.
    pub fn for_field(field: &str) -> Self {
        MessageFields::default().with(FIELD_KEY, field)
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0
            .insert(key.to_string(), MessageValue::Text(value.into()));
        self
    }

    pub fn with_list<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            key.to_string(),
            MessageValue::List(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MessageValue> {
        self.0.get_mut(key)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut MessageValue)> {
        self.0.iter_mut()
    }

    /// Flattens every entry to its display string.
    pub fn to_display_map(&self) -> IndexMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.display()))
            .collect()
    }
}

// ─── Verdicts ───────────────────────────────────────────────────────────────

/// Why a rule failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// The template for this failure. Usually the rule's own
    /// [`Rule::message`], but rules may pick a variant per value kind.
    pub message: String,
    pub fields: MessageFields,
    /// The message is final text; no overrides or placeholders apply to it
    /// except a message override for the rule.
    pub literal: bool,
}

/// Outcome of one rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

impl Verdict {
    /// Passes when `ok`, otherwise fails with `message` and `fields`.
    pub fn check(ok: bool, message: &str, fields: MessageFields) -> Self {
        if ok {
            Verdict::Pass
        } else {
            Verdict::Fail(Failure {
                message: message.to_string(),
                fields,
                literal: false,
            })
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A named validation rule.
///
/// Rules are stateless and shared: the message fields of a failure travel
/// back in the [`Verdict`] instead of being stored on the rule.
pub trait Rule: Send + Sync {
    /// Unique name used in rule tokens.
    fn name(&self) -> &str;

    /// Evaluated even when the field is absent or null.
    fn implicit(&self) -> bool {
        false
    }

    /// A failure skips the remaining rules of the same concrete field.
    fn stop(&self) -> bool {
        false
    }

    /// Default message template.
    fn message(&self) -> &str;

    /// Evaluates the rule. `value` is `None` when the path does not resolve.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the parameters or the data make
    /// the rule meaningless (e.g. an unparseable date reference). An ordinary
    /// validation failure is `Ok(Verdict::Fail(..))`.
    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        ctx: &RuleContext<'_>,
    ) -> Result<Verdict>;

    /// Boolean form of [`Rule::evaluate`].
    fn passes(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        ctx: &RuleContext<'_>,
    ) -> Result<bool> {
        Ok(self.evaluate(field, value, parameters, ctx)?.is_pass())
    }
}

impl fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("implicit", &self.implicit())
            .field("stop", &self.stop())
            .finish()
    }
}

// ─── Context ────────────────────────────────────────────────────────────────

/// Read access to the whole validation run, for rules that relate fields.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    data: &'a Value,
    rules: &'a RuleSet,
    registry: &'a RuleRegistry,
}

impl<'a> RuleContext<'a> {
    pub fn new(data: &'a Value, rules: &'a RuleSet, registry: &'a RuleRegistry) -> Self {
        Self {
            data,
            rules,
            registry,
        }
    }

    /// The normalized record.
    pub fn data(&self) -> &'a Value {
        self.data
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    pub fn registry(&self) -> &'a RuleRegistry {
        self.registry
    }

    pub fn value(&self, path: &str) -> Option<Value> {
        primitives::resolve_path(path, self.data)
    }

    pub fn is_present(&self, path: &str) -> bool {
        primitives::is_present(path, self.data)
    }

    pub fn is_missing(&self, path: &str) -> bool {
        primitives::is_missing(path, self.data)
    }

    pub fn is_missing_or_empty(&self, path: &str) -> bool {
        primitives::is_missing_or_empty(path, self.data)
    }

    /// Parameters the rule set declares for `rule_name` on `field`.
    ///
    /// The field is looked up as given, then in wildcard form, so a concrete
    /// `list.0.at` finds the rules declared for `list.*.at`. When the rule
    /// appears several times, the last occurrence with parameters wins.
    pub fn declared_parameters(&self, field: &str, rule_name: &str) -> Option<Vec<String>> {
        let list = self
            .rules
            .get(field)
            .or_else(|| self.rules.get(&wildcard_form(field)))?;

        list.specs()
            .iter()
            .map(parse_rule_spec)
            .filter(|(name, params)| name == rule_name && !params.is_empty())
            .map(|(_, params)| params)
            .last()
    }
}

// ─── Function rules ─────────────────────────────────────────────────────────

type Predicate = dyn Fn(&str, Option<&Value>, &RuleContext<'_>) -> Option<String> + Send + Sync;

/// A rule backed by a closure, for use inline in a rule list.
///
/// The closure receives the concrete field path, the value and the context,
/// and returns `None` to pass or `Some(message)` to fail with that exact
/// message.
///
/// ```rust
/// use rulebook::{FunctionRule, RuleSet, RuleSpec, Validator, Value};
///
/// let even = FunctionRule::new(|_, value, _| match value {
///     Some(Value::Integer(i)) if i % 2 == 0 => None,
///     _ => Some("Must be even.".to_string()),
/// });
/// let rules = RuleSet::new().with("n", vec![RuleSpec::from(even)]);
/// let data = Value::from(serde_json::json!({"n": 3}));
///
/// let errors = Validator::new().validate(&data, &rules).unwrap();
/// assert_eq!(errors["n"], vec!["Must be even."]);
/// ```
#[derive(Clone)]
pub struct FunctionRule {
    name: String,
    implicit: bool,
    stop: bool,
    predicate: Arc<Predicate>,
}

impl FunctionRule {
    /// Name of every rule built without [`FunctionRule::named`]. Unnamed
    /// rules share it, so a `"function"` message override applies to all of
    /// them at once.
    pub const DEFAULT_NAME: &'static str = "function";

    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str, Option<&Value>, &RuleContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            implicit: false,
            stop: false,
            predicate: Arc::new(predicate),
        }
    }

    /// Names the rule, which keys its message overrides. Name a rule to
    /// override its message apart from other function rules.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }
}

impl fmt::Debug for FunctionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRule")
            .field("name", &self.name)
            .field("implicit", &self.implicit)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl Rule for FunctionRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn implicit(&self) -> bool {
        self.implicit
    }

    fn stop(&self) -> bool {
        self.stop
    }

    fn message(&self) -> &str {
        ""
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        _parameters: &[String],
        ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        Ok(match (self.predicate)(field, value, ctx) {
            None => Verdict::Pass,
            Some(message) => Verdict::Fail(Failure {
                message,
                fields: MessageFields::for_field(field),
                literal: true,
            }),
        })
    }
}
