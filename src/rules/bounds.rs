//! `min`, `max` and `size`.

use rust_decimal::Decimal;

use crate::enums::Bound;
use crate::error::{Result, ValidatorError};
use crate::messages;
use crate::rule::{Failure, MessageFields, Rule, RuleContext, Verdict};
use crate::types::Value;

/// Measures strings by character count, lists and maps by element count,
/// and numbers by value. Decimals compare exactly against the parameter read
/// as a decimal, integers against an integral parameter read as an integer.
/// Any other kind fails.
#[derive(Debug)]
pub struct BoundRule {
    bound: Bound,
}

/// Which template a failure uses, by what was measured.
#[derive(Clone, Copy)]
enum Measured {
    Characters,
    Items,
    Number,
}

impl BoundRule {
    pub fn new(bound: Bound) -> Self {
        Self { bound }
    }

    fn template(&self, measured: Measured) -> &'static str {
        match (self.bound, measured) {
            (Bound::Min, Measured::Characters) => messages::MIN_STRING,
            (Bound::Min, Measured::Items) => messages::MIN_ITEMS,
            (Bound::Min, Measured::Number) => messages::MIN,
            (Bound::Max, Measured::Characters) => messages::MAX_STRING,
            (Bound::Max, Measured::Items) => messages::MAX_ITEMS,
            (Bound::Max, Measured::Number) => messages::MAX,
            (Bound::Exact, _) => messages::SIZE,
        }
    }

    fn parameter<'p>(&self, parameters: &'p [String]) -> Result<&'p str> {
        parameters
            .first()
            .map(String::as_str)
            .ok_or_else(|| ValidatorError::invalid_parameter(self.name(), "expected a number"))
    }

    fn not_a_number(&self, raw: &str) -> ValidatorError {
        ValidatorError::invalid_parameter(self.name(), format!("'{}' is not a number", raw))
    }
}

impl Rule for BoundRule {
    fn name(&self) -> &str {
        self.bound.as_str()
    }

    fn message(&self) -> &str {
        self.template(Measured::Number)
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let raw = self.parameter(parameters)?;
        let expected: f64 = raw.trim().parse().map_err(|_| self.not_a_number(raw))?;

        let (ok, measured) = match value {
            Some(Value::String(s)) => (
                self.bound.holds(s.chars().count() as f64, expected),
                Measured::Characters,
            ),
            Some(Value::List(items)) => {
                (self.bound.holds(items.len() as f64, expected), Measured::Items)
            }
            Some(Value::Map(map)) => (self.bound.holds(map.len() as f64, expected), Measured::Items),
            Some(Value::Integer(i)) => match raw.trim().parse::<i64>() {
                Ok(exact) => (self.bound.holds(*i, exact), Measured::Number),
                Err(_) => (self.bound.holds(*i as f64, expected), Measured::Number),
            },
            Some(Value::Float(f)) => (self.bound.holds(*f, expected), Measured::Number),
            Some(Value::Decimal(d)) => {
                let exact = raw
                    .trim()
                    .parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(raw.trim()))
                    .map_err(|_| self.not_a_number(raw))?;
                (self.bound.holds(*d, exact), Measured::Number)
            }
            _ => (false, Measured::Number),
        };

        if ok {
            return Ok(Verdict::Pass);
        }
        Ok(Verdict::Fail(Failure {
            message: self.template(measured).to_string(),
            fields: MessageFields::for_field(field).with(self.bound.as_str(), raw),
            literal: false,
        }))
    }
}
