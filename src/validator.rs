//! The validation engine.

use indexmap::IndexMap;
use std::borrow::Cow;
use std::sync::Arc;

use crate::error::{Result, ValidatorError};
use crate::format::Overrides;
use crate::parse::parse_rule_spec;
use crate::primitives::{expand_wildcards, resolve_path};
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleContext, Verdict};
use crate::rules::predicates;
use crate::types::{ErrorMap, Report, RuleSet, RuleSpec, Value, ValueOverride, flatten};

/// A bundle of extra rules, registered after the built-ins.
pub trait Plugin {
    fn rules(&self) -> Vec<Arc<dyn Rule>> {
        Vec::new()
    }
}

/// A rule resolved from the registry, with the parameters of its token.
type Step = (Arc<dyn Rule>, Vec<String>);

/// Validates records against rule sets.
///
/// A validator owns its rule registry and the message, field and value
/// override layers. Validation takes `&self` and keeps no state between
/// calls, so one instance can serve any number of threads; changing
/// overrides or registering rules needs `&mut self`.
///
/// ```rust
/// use rulebook::{RuleSet, Validator, Value};
///
/// let mut validator = Validator::new();
/// validator.override_field("email", "e-mail address");
///
/// let data = Value::from(serde_json::json!({"email": "john@"}));
/// let rules = RuleSet::from([("email", "required|email"), ("name", "required")]);
///
/// let errors = validator.validate(&data, &rules).unwrap();
/// assert_eq!(
///     errors["email"],
///     vec!["The e-mail address field has to be a valid email address."]
/// );
/// assert_eq!(errors["name"], vec!["The name field is required."]);
/// ```
#[derive(Clone, Debug)]
pub struct Validator {
    registry: RuleRegistry,
    overrides: Overrides,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with every built-in rule and no overrides.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_builtin_rules(),
            overrides: Overrides::default(),
        }
    }

    /// A validator with the built-ins followed by each plugin's rules.
    ///
    /// # Errors
    ///
    /// Fails when a plugin rule has no name or reuses a registered name.
    pub fn with_plugins(plugins: &[&dyn Plugin]) -> Result<Self> {
        let mut validator = Self::new();
        for plugin in plugins {
            validator.register_rules(plugin.rules())?;
        }
        Ok(validator)
    }

    pub fn register_rule(&mut self, rule: impl Rule + 'static) -> Result<()> {
        self.registry.register(rule)
    }

    pub fn register_rules(&mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Result<()> {
        self.registry.register_many(rules)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    // ─── Overrides ──────────────────────────────────────────────────────────

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Rule name, field pattern or `pattern.rule` → message template.
    pub fn message_overrides_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.overrides.messages
    }

    /// Field pattern → display label.
    pub fn field_overrides_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.overrides.fields
    }

    pub fn value_overrides_mut(&mut self) -> &mut IndexMap<String, ValueOverride> {
        &mut self.overrides.values
    }

    pub fn override_message(
        &mut self,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> &mut Self {
        self.overrides.messages.insert(key.into(), template.into());
        self
    }

    pub fn override_field(&mut self, pattern: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.overrides.fields.insert(pattern.into(), label.into());
        self
    }

    /// Relabels a value token wherever it is displayed.
    pub fn override_value(&mut self, token: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.overrides
            .values
            .insert(token.into(), ValueOverride::Label(label.into()));
        self
    }

    /// Relabels value tokens only in messages about `pattern`, or about
    /// fields that reference it.
    pub fn override_field_values<I, K, V>(&mut self, pattern: impl Into<String>, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .values
            .insert(pattern.into(), ValueOverride::scoped(labels));
        self
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    // ─── Validation ─────────────────────────────────────────────────────────

    /// Validates `data` against `rules`.
    ///
    /// Returns the failures keyed by concrete field path, in evaluation
    /// order. Fields without failures have no entry.
    ///
    /// # Errors
    ///
    /// Any configuration error (unknown rule, data that is not a map, bad
    /// rule parameters, a template with an unknown placeholder) abandons the
    /// whole call.
    pub fn validate(&self, data: &Value, rules: &RuleSet) -> Result<ErrorMap> {
        let data = normalize(data)?;
        let plan = self.plan(rules)?;
        let ctx = RuleContext::new(&data, rules, &self.registry);

        tracing::debug!(fields = rules.len(), "validation started");

        let mut errors = ErrorMap::new();
        for (raw_field, steps) in &plan {
            for field in expand_wildcards(raw_field, &data) {
                let value = resolve_path(&field, &data);
                let present = value.as_ref().is_some_and(|v| !v.is_null());

                for (rule, parameters) in steps {
                    if !present && !rule.implicit() {
                        continue;
                    }

                    let verdict = rule.evaluate(&field, value.as_ref(), parameters, &ctx)?;
                    tracing::trace!(
                        field = %field,
                        rule = rule.name(),
                        passed = verdict.is_pass(),
                        "evaluated rule"
                    );

                    if let Verdict::Fail(failure) = verdict {
                        let message = self.overrides.format(rule.name(), &field, failure)?;
                        errors.entry(field.clone()).or_default().push(message);
                        if rule.stop() {
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!(
            failed_fields = errors.len(),
            errors = errors.values().map(Vec::len).sum::<usize>(),
            "validation finished"
        );
        Ok(errors)
    }

    /// Like [`Validator::validate`], with every message in one list, field
    /// order then rule order.
    pub fn validate_flat(&self, data: &Value, rules: &RuleSet) -> Result<Vec<String>> {
        Ok(flatten(&self.validate(data, rules)?))
    }

    pub fn validate_with(&self, data: &Value, rules: &RuleSet, flat: bool) -> Result<Report> {
        let errors = self.validate(data, rules)?;
        Ok(if flat {
            Report::Flat(flatten(&errors))
        } else {
            Report::Map(errors)
        })
    }

    /// Resolves every rule of the set before anything is evaluated, so an
    /// unknown rule never leaves a partial report behind.
    fn plan<'r>(&self, rules: &'r RuleSet) -> Result<Vec<(&'r str, Vec<Step>)>> {
        rules
            .iter()
            .map(|(field, list)| {
                let steps = list
                    .specs()
                    .into_iter()
                    .map(|spec| self.resolve(spec))
                    .collect::<Result<Vec<_>>>()?;
                Ok((field.as_str(), steps))
            })
            .collect()
    }

    fn resolve(&self, spec: RuleSpec) -> Result<Step> {
        if let RuleSpec::Function(function) = spec {
            return Ok((Arc::new(function), Vec::new()));
        }
        let (name, parameters) = parse_rule_spec(&spec);
        let rule = self
            .registry
            .get(&name)
            .ok_or(ValidatorError::RuleNotFound(name))?;
        Ok((rule, parameters))
    }

    // ─── Predicates ─────────────────────────────────────────────────────────

    pub fn valid_email(value: impl Into<Value>) -> bool {
        predicates::valid_email(&value.into())
    }

    pub fn valid_url(value: impl Into<Value>) -> bool {
        predicates::valid_url(&value.into())
    }

    pub fn valid_ip(value: impl Into<Value>) -> bool {
        predicates::valid_ip(&value.into())
    }

    pub fn valid_uuid4(value: impl Into<Value>) -> bool {
        predicates::valid_uuid4(&value.into())
    }

    pub fn valid_string(value: impl Into<Value>) -> bool {
        predicates::valid_string(&value.into())
    }

    pub fn valid_integer(value: impl Into<Value>) -> bool {
        predicates::valid_integer(&value.into())
    }

    pub fn valid_float(value: impl Into<Value>) -> bool {
        predicates::valid_float(&value.into())
    }

    pub fn valid_decimal(value: impl Into<Value>) -> bool {
        predicates::valid_decimal(&value.into())
    }

    pub fn valid_boolean(value: impl Into<Value>) -> bool {
        predicates::valid_boolean(&value.into())
    }

    pub fn valid_json(value: impl Into<Value>) -> bool {
        predicates::valid_json(&value.into())
    }

    pub fn valid_alpha_num(value: impl Into<Value>) -> bool {
        predicates::valid_alpha_num(&value.into())
    }

    pub fn valid_alpha_num_space(value: impl Into<Value>) -> bool {
        predicates::valid_alpha_num_space(&value.into())
    }

    pub fn valid_uppercase(value: impl Into<Value>) -> bool {
        predicates::valid_uppercase(&value.into())
    }

    pub fn valid_list(value: impl Into<Value>) -> bool {
        predicates::valid_list(&value.into())
    }

    pub fn valid_dict(value: impl Into<Value>) -> bool {
        predicates::valid_dict(&value.into())
    }

    pub fn valid_date_time(value: impl Into<Value>, format: Option<&str>) -> bool {
        predicates::valid_date_time(&value.into(), format)
    }
}

/// Views the record as a map: maps as they are, attribute bags through
/// their attributes.
fn normalize(data: &Value) -> Result<Cow<'_, Value>> {
    match data {
        Value::Map(_) => Ok(Cow::Borrowed(data)),
        Value::Object(bag) => Ok(Cow::Owned(Value::Map(bag.attributes()))),
        other => Err(ValidatorError::InvalidData(other.kind().to_string())),
    }
}
