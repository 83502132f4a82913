//! Stand-alone value predicates behind the type and format rules.
//!
//! Each predicate answers for a single value, with no field context. They
//! are also exposed as `Validator::valid_*`.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use uuid::{Uuid, Variant};

use crate::rules::temporal::parse_date_time;
use crate::types::Value;

// ─── Cached regexes ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&’*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$").unwrap()
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .unwrap()
});

static ALPHA_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static ALPHA_NUM_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());

fn matches_str(re: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| re.is_match(s))
}

// ─── Kinds ──────────────────────────────────────────────────────────────────

pub fn valid_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Booleans are never integers.
pub fn valid_integer(value: &Value) -> bool {
    matches!(value, Value::Integer(_))
}

pub fn valid_float(value: &Value) -> bool {
    matches!(value, Value::Float(_))
}

pub fn valid_decimal(value: &Value) -> bool {
    matches!(value, Value::Decimal(_))
}

pub fn valid_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn valid_list(value: &Value) -> bool {
    matches!(value, Value::List(_))
}

pub fn valid_dict(value: &Value) -> bool {
    matches!(value, Value::Map(_))
}

// ─── Formats ────────────────────────────────────────────────────────────────

pub fn valid_email(value: &Value) -> bool {
    matches_str(&EMAIL_RE, value)
}

pub fn valid_url(value: &Value) -> bool {
    matches_str(&URL_RE, value)
}

/// IPv4 or IPv6 text, or a non-negative integer read as a packed IPv4
/// (below 2^32) or IPv6 address.
pub fn valid_ip(value: &Value) -> bool {
    match value {
        Value::String(s) => s.parse::<IpAddr>().is_ok(),
        Value::Integer(i) => *i >= 0,
        _ => false,
    }
}

/// A version 4, RFC 4122 variant UUID. Strings must already be in canonical
/// lowercase hyphenated form.
pub fn valid_uuid4(value: &Value) -> bool {
    let is_v4 = |u: &Uuid| u.get_version_num() == 4 && u.get_variant() == Variant::RFC4122;
    match value {
        Value::Uuid(u) => is_v4(u),
        Value::String(s) => Uuid::parse_str(s)
            .is_ok_and(|u| is_v4(&u) && u.hyphenated().to_string() == *s),
        _ => false,
    }
}

/// A string holding a JSON document.
pub fn valid_json(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| serde_json::from_str::<serde_json::Value>(s).is_ok())
}

pub fn valid_alpha_num(value: &Value) -> bool {
    matches_str(&ALPHA_NUM_RE, value)
}

pub fn valid_alpha_num_space(value: &Value) -> bool {
    matches_str(&ALPHA_NUM_SPACE_RE, value)
}

/// A string with no lowercase letters.
pub fn valid_uppercase(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.to_uppercase() == s)
}

/// `"yes"`, `"on"`, `1` or `true`.
pub fn valid_accepted(value: &Value) -> bool {
    match value {
        Value::String(s) => s == "yes" || s == "on",
        Value::Bool(b) => *b,
        Value::Integer(i) => *i == 1,
        Value::Float(f) => *f == 1.0,
        Value::Decimal(d) => *d == rust_decimal::Decimal::ONE,
        _ => false,
    }
}

/// A native date/time, or a string in `format`.
///
/// Without a format the string must have the exact
/// `YYYY-MM-DD hh:mm:ss` shape.
pub fn valid_date_time(value: &Value, format: Option<&str>) -> bool {
    match value {
        Value::DateTime(_) | Value::Date(_) => true,
        Value::String(s) => parse_date_time(s, format).is_some(),
        _ => false,
    }
}
