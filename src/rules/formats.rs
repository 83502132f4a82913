//! Format and membership rules.

use regex::Regex;
use std::sync::Arc;

use crate::error::{Result, ValidatorError};
use crate::messages;
use crate::rule::{MessageFields, Rule, RuleContext, VALUES_KEY, Verdict};
use crate::rules::PredicateRule;
use crate::rules::predicates;
use crate::types::Value;

pub(crate) fn rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(PredicateRule::new("email", messages::EMAIL, predicates::valid_email)),
        Arc::new(PredicateRule::new("url", messages::URL, predicates::valid_url)),
        Arc::new(PredicateRule::new("ip", messages::IP, predicates::valid_ip)),
        Arc::new(PredicateRule::new("uuid4", messages::UUID4, predicates::valid_uuid4)),
        Arc::new(PredicateRule::new("json", messages::JSON, predicates::valid_json)),
        Arc::new(PredicateRule::new(
            "alpha_num",
            messages::ALPHA_NUM,
            predicates::valid_alpha_num,
        )),
        Arc::new(PredicateRule::new(
            "alpha_num_space",
            messages::ALPHA_NUM_SPACE,
            predicates::valid_alpha_num_space,
        )),
        Arc::new(PredicateRule::new(
            "uppercase",
            messages::UPPERCASE,
            predicates::valid_uppercase,
        )),
        Arc::new(PredicateRule::new(
            "accepted",
            messages::ACCEPTED,
            predicates::valid_accepted,
        )),
        Arc::new(RegexRule),
        Arc::new(AffixRule { suffix: false }),
        Arc::new(AffixRule { suffix: true }),
        Arc::new(InRule),
    ]
}

// ─── regex ──────────────────────────────────────────────────────────────────

/// `regex:pattern`: the whole string must match.
///
/// Parameters are re-joined with commas, so `regex:^a{1,3}$` keeps its
/// quantifier. A pattern containing `|` needs the list rule form.
#[derive(Debug)]
pub struct RegexRule;

impl Rule for RegexRule {
    fn name(&self) -> &str {
        "regex"
    }

    fn message(&self) -> &str {
        messages::REGEX
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        if parameters.is_empty() {
            return Err(ValidatorError::invalid_parameter(
                self.name(),
                "expected a pattern",
            ));
        }
        let pattern = parameters.join(",");
        let re = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ValidatorError::InvalidRegex {
                pattern: pattern.clone(),
                message: e.to_string(),
            }
        })?;

        let ok = value.and_then(Value::as_str).is_some_and(|s| re.is_match(s));
        Ok(Verdict::check(
            ok,
            self.message(),
            MessageFields::for_field(field).with("regex", pattern),
        ))
    }
}

// ─── starts_with / ends_with ────────────────────────────────────────────────

/// The value's display form starts (or ends) with any parameter.
#[derive(Debug)]
pub struct AffixRule {
    suffix: bool,
}

impl Rule for AffixRule {
    fn name(&self) -> &str {
        if self.suffix { "ends_with" } else { "starts_with" }
    }

    fn message(&self) -> &str {
        if self.suffix {
            messages::ENDS_WITH
        } else {
            messages::STARTS_WITH
        }
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let shown = value.map(Value::to_string).unwrap_or_default();
        let ok = parameters.iter().any(|p| {
            if self.suffix {
                shown.ends_with(p.as_str())
            } else {
                shown.starts_with(p.as_str())
            }
        });
        Ok(Verdict::check(
            ok,
            self.message(),
            MessageFields::for_field(field).with_list(VALUES_KEY, parameters.iter().cloned()),
        ))
    }
}

// ─── in ─────────────────────────────────────────────────────────────────────

/// The value's display form equals one parameter exactly. Case-sensitive.
#[derive(Debug)]
pub struct InRule;

impl Rule for InRule {
    fn name(&self) -> &str {
        "in"
    }

    fn message(&self) -> &str {
        messages::IN
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let ok = value.is_some_and(|v| {
            let shown = v.to_string();
            parameters.iter().any(|p| *p == shown)
        });
        Ok(Verdict::check(
            ok,
            self.message(),
            MessageFields::for_field(field).with_list(VALUES_KEY, parameters.iter().cloned()),
        ))
    }
}
