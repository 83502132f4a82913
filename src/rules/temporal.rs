//! `date_time` and the before/after comparison rules.

use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;

use crate::enums::Temporal;
use crate::error::{Result, ValidatorError};
use crate::messages;
use crate::rule::{MessageFields, OTHER_KEY, Rule, RuleContext, Verdict};
use crate::rules::predicates::valid_date_time;
use crate::types::Value;

/// Format used when neither the rule nor the rule set names one.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static DEFAULT_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap());

// ─── Parsing ────────────────────────────────────────────────────────────────

/// Parses `input` with a strftime-style `format`.
///
/// A format without a time part yields midnight; a format without a date
/// part yields 1900-01-01. Leap seconds are rejected.
pub fn parse_with_format(input: &str, format: &str) -> Option<NaiveDateTime> {
    let parsed = match NaiveDateTime::parse_from_str(input, format) {
        Ok(dt) => dt,
        // The format lacks a date or a time part.
        Err(e) if e.kind() == ParseErrorKind::NotEnough => NaiveDate::parse_from_str(input, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .or_else(|| {
                let time = NaiveTime::parse_from_str(input, format).ok()?;
                Some(NaiveDate::from_ymd_opt(1900, 1, 1)?.and_time(time))
            })?,
        Err(_) => return None,
    };

    (parsed.nanosecond() < 1_000_000_000).then_some(parsed)
}

/// Parses a `date_time` string. Without an explicit format the input must
/// also have the exact `YYYY-MM-DD hh:mm:ss` shape.
pub(crate) fn parse_date_time(input: &str, format: Option<&str>) -> Option<NaiveDateTime> {
    match format {
        Some(format) => parse_with_format(input, format),
        None if DEFAULT_SHAPE_RE.is_match(input) => {
            parse_with_format(input, DEFAULT_DATE_TIME_FORMAT)
        }
        None => None,
    }
}

// ─── date_time ──────────────────────────────────────────────────────────────

/// `date_time[:format]`: a native date/time, or a string in the format.
#[derive(Debug)]
pub struct DateTimeRule;

impl Rule for DateTimeRule {
    fn name(&self) -> &str {
        "date_time"
    }

    fn stop(&self) -> bool {
        true
    }

    fn message(&self) -> &str {
        messages::DATE_TIME
    }

    fn evaluate(
        &self,
        field: &str,
        value: Option<&Value>,
        parameters: &[String],
        _ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let supplied = parameters
            .first()
            .map(String::as_str)
            .filter(|f| !f.is_empty());
        let fields = MessageFields::for_field(field)
            .with("format", supplied.unwrap_or(DEFAULT_DATE_TIME_FORMAT));

        let ok = value.is_some_and(|v| valid_date_time(v, supplied));
        Ok(Verdict::check(ok, self.message(), fields))
    }
}

// ─── before / after ─────────────────────────────────────────────────────────

/// A point in time as found in the data. Native dates carry no time of day.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Moment {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl Moment {
    fn date(self) -> NaiveDate {
        match self {
            Moment::DateTime(dt) => dt.date(),
            Moment::Date(d) => d,
        }
    }
}

/// A date compared with a date/time compares by date.
fn ordered(ordering: Temporal, field: Moment, reference: Moment) -> bool {
    match (field, reference) {
        (Moment::DateTime(a), Moment::DateTime(b)) => ordering.holds(a, b),
        (a, b) => ordering.holds(a.date(), b.date()),
    }
}

/// The `date_time` format declared for `path`, or the default.
fn declared_format(path: &str, ctx: &RuleContext<'_>) -> String {
    ctx.declared_parameters(path, "date_time")
        .and_then(|params| params.into_iter().next())
        .filter(|format| !format.is_empty())
        .unwrap_or_else(|| DEFAULT_DATE_TIME_FORMAT.to_string())
}

/// Determines the moment a rule parameter (or the field itself) stands for.
///
/// In order: the reference as a literal in the default format; the value of
/// the field the reference names, native or parsed with that field's
/// declared format; the reference as a literal in the declared format of
/// `field`.
fn resolve_moment(field: &str, reference: Option<&str>, ctx: &RuleContext<'_>) -> Result<Moment> {
    let Some(reference) = reference else {
        return Err(ValidatorError::InvalidDateTimeFormat);
    };

    if let Some(dt) = parse_with_format(reference, DEFAULT_DATE_TIME_FORMAT) {
        return Ok(Moment::DateTime(dt));
    }

    match ctx.value(reference) {
        Some(Value::DateTime(dt)) => return Ok(Moment::DateTime(dt)),
        Some(Value::Date(d)) => return Ok(Moment::Date(d)),
        Some(Value::String(s)) => {
            if let Some(dt) = parse_with_format(&s, &declared_format(reference, ctx)) {
                return Ok(Moment::DateTime(dt));
            }
        }
        _ => {}
    }

    parse_with_format(reference, &declared_format(field, ctx))
        .map(Moment::DateTime)
        .ok_or(ValidatorError::InvalidDateTimeFormat)
}

/// `before`, `before_or_equal`, `after` and `after_or_equal`.
///
/// The parameter is either a literal date/time or the path of another field.
#[derive(Debug)]
pub struct TemporalRule {
    ordering: Temporal,
}

impl TemporalRule {
    pub fn new(ordering: Temporal) -> Self {
        Self { ordering }
    }
}

impl Rule for TemporalRule {
    fn name(&self) -> &str {
        self.ordering.as_str()
    }

    fn message(&self) -> &str {
        match self.ordering {
            Temporal::Before => messages::BEFORE,
            Temporal::BeforeOrEqual => messages::BEFORE_OR_EQUAL,
            Temporal::After => messages::AFTER,
            Temporal::AfterOrEqual => messages::AFTER_OR_EQUAL,
        }
    }

    fn evaluate(
        &self,
        field: &str,
        _value: Option<&Value>,
        parameters: &[String],
        ctx: &RuleContext<'_>,
    ) -> Result<Verdict> {
        let reference = parameters.first().map(String::as_str);
        let own = resolve_moment(field, Some(field), ctx)?;
        let other = resolve_moment(field, reference, ctx)?;

        tracing::trace!(field, ?own, ?other, rule = self.name(), "comparing moments");

        let fields = MessageFields::for_field(field).with(OTHER_KEY, reference.unwrap_or_default());
        Ok(Verdict::check(
            ordered(self.ordering, own, other),
            self.message(),
            fields,
        ))
    }
}
