//! Presence rules: `required*`, `filled`, `not_with` and `prohibited*`.

use crate::enums::Presence;
use crate::error::{Result, ValidatorError};
use crate::messages;
use crate::primitives::{is_empty_value, literal_equal, loose_equal};
use crate::rule::{MessageFields, OTHER_KEY, Rule, RuleContext, VALUE_KEY, Verdict};
use crate::types::Value;

#[derive(Debug)]
pub struct PresenceRule {
    presence: Presence,
}

impl PresenceRule {
    pub fn new(presence: Presence) -> Self {
        Self { presence }
    }

    /// Other-field list of the `*_with` / `*_without` rules.
    fn other_fields<'p>(&self, parameters: &'p [String]) -> Result<&'p [String]> {
        if parameters.is_empty() {
            return Err(ValidatorError::invalid_parameter(
                self.name(),
                "expected at least one field",
            ));
        }
        Ok(parameters)
    }

    /// `other,value` of the conditional rules.
    fn condition<'p>(&self, parameters: &'p [String]) -> Result<(&'p str, &'p str)> {
        match parameters {
            [other, expected] => Ok((other.as_str(), expected.as_str())),
            _ => Err(ValidatorError::invalid_parameter(
                self.name(),
                format!("expected a field and a value, got {} parameters", parameters.len()),
            )),
        }
    }
}

impl Rule for PresenceRule {
    fn name(&self) -> &str {
        self.presence.as_str()
    }

    fn implicit(&self) -> bool {
        self.presence.is_implicit()
    }

    fn stop(&self) -> bool {
        self.presence.is_stop()
    }

    fn message(&self) -> &str {
        match self.presence {
            Presence::Required => messages::REQUIRED,
            Presence::RequiredWith => messages::REQUIRED_WITH,
            Presence::RequiredWithout => messages::REQUIRED_WITHOUT,
            Presence::RequiredIf => messages::REQUIRED_IF,
            Presence::RequiredUnless => messages::REQUIRED_UNLESS,
            Presence::Filled => messages::FILLED,
            Presence::NotWith => messages::NOT_WITH,
            Presence::Prohibited => messages::PROHIBITED,
            Presence::ProhibitedIf => messages::PROHIBITED_IF,
            Presence::ProhibitedUnless => messages::PROHIBITED_UNLESS,
            Presence::ProhibitedWith => messages::PROHIBITED_WITH,
        }
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let fields = MessageFields::for_field(field);
        let empty = is_empty_value(value);

        let (ok, fields) = match self.presence {
            Presence::Required => (!ctx.is_missing(field) && !empty, fields),
            Presence::Filled => (ctx.is_missing(field) || !empty, fields),
            Presence::Prohibited => (empty, fields),

            Presence::RequiredWith | Presence::RequiredWithout => {
                let others = self.other_fields(parameters)?;
                let triggered = if self.presence == Presence::RequiredWith {
                    others.iter().any(|o| !ctx.is_missing_or_empty(o))
                } else {
                    others.iter().any(|o| ctx.is_missing_or_empty(o))
                };
                (
                    !(ctx.is_missing_or_empty(field) && triggered),
                    fields.with_list(OTHER_KEY, others.iter().cloned()),
                )
            }
            Presence::ProhibitedWith => {
                let others = self.other_fields(parameters)?;
                (
                    empty || others.iter().all(|o| ctx.is_missing_or_empty(o)),
                    fields.with_list(OTHER_KEY, others.iter().cloned()),
                )
            }

            Presence::RequiredIf
            | Presence::RequiredUnless
            | Presence::ProhibitedIf
            | Presence::ProhibitedUnless => {
                let (other, expected) = self.condition(parameters)?;
                let actual = ctx.value(other);
                let equal = match self.presence {
                    Presence::RequiredIf | Presence::RequiredUnless => {
                        loose_equal(expected, actual.as_ref())
                    }
                    _ => literal_equal(expected, actual.as_ref()),
                };
                let ok = match self.presence {
                    Presence::RequiredIf => !(ctx.is_missing_or_empty(field) && equal),
                    Presence::RequiredUnless => !(ctx.is_missing_or_empty(field) && !equal),
                    Presence::ProhibitedIf => empty || !equal,
                    _ => empty || equal,
                };
                (ok, fields.with(OTHER_KEY, other).with(VALUE_KEY, expected))
            }

            Presence::NotWith => {
                let other = parameters.first().ok_or_else(|| {
                    ValidatorError::invalid_parameter(self.name(), "expected a field")
                })?;
                (
                    ctx.is_missing(field) || ctx.is_missing(other),
                    fields.with(OTHER_KEY, other.as_str()),
                )
            }
        };

        Ok(Verdict::check(ok, self.message(), fields))
    }
}
