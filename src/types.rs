use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::enums::ValueKind;
use crate::error::ValidatorError;
use crate::parse::split_rules;
use crate::rule::FunctionRule;

// ─── Attribute bags ──────────────────────────────────────────────────────────

/// A value that exposes enumerable named fields.
///
/// Records that are not already a [`Value::Map`] can be validated by
/// implementing this trait and wrapping them with [`Value::object`]. The
/// resolver walks into bags exactly like it walks into maps.
///
/// ```rust
/// use indexmap::IndexMap;
/// use rulebook::{AttributeBag, Value};
///
/// #[derive(Debug)]
/// struct Signup {
///     email: String,
/// }
///
/// impl AttributeBag for Signup {
///     fn attributes(&self) -> IndexMap<String, Value> {
///         IndexMap::from([("email".to_string(), Value::from(self.email.as_str()))])
///     }
/// }
///
/// let data = Value::object(Signup { email: "john@".into() });
/// assert_eq!(data.kind().as_str(), "object");
/// ```
pub trait AttributeBag: fmt::Debug + Send + Sync {
    /// All named fields, in declaration order.
    fn attributes(&self) -> IndexMap<String, Value>;

    /// A single named field.
    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes().shift_remove(name)
    }
}

// ─── Value ───────────────────────────────────────────────────────────────────

/// A record under validation, or any value nested inside one.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Uuid(Uuid),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Object(Arc<dyn AttributeBag>),
}

impl Value {
    /// Wraps an attribute bag.
    pub fn object(bag: impl AttributeBag + 'static) -> Self {
        Value::Object(Arc::new(bag))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::String(_) => ValueKind::String,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Date(_) => ValueKind::Date,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Dict,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts to a JSON tree. Native values that JSON cannot carry
    /// (decimals, dates, uuids) become strings; attribute bags become objects.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Object(bag) => Json::Object(
                bag.attributes()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            other => Json::String(other.to_string()),
        }
    }
}

/// The display form used by messages and by parameter comparisons.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            // Integral floats keep their fractional digit so that `2.0` never reads as `2`.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Value::Float(x) => write!(f, "{}", x),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Value::List(_) | Value::Map(_) | Value::Object(_) => {
                write!(f, "{}", self.to_json())
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                Arc::ptr_eq(a, b) || a.attributes() == b.attributes()
            }
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// ─── Rule sets ───────────────────────────────────────────────────────────────

/// One entry of an explicit rule list.
#[derive(Clone, Debug)]
pub enum RuleSpec {
    /// `name` or `name:p1,p2`.
    Token(String),
    /// A rule name with parameters that are taken verbatim, so they may
    /// contain the parameter delimiter.
    Structured { name: String, parameters: Vec<String> },
    /// An inline predicate.
    Function(FunctionRule),
}

impl RuleSpec {
    pub fn with_parameters<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleSpec::Structured {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(token: &str) -> Self {
        RuleSpec::Token(token.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(token: String) -> Self {
        RuleSpec::Token(token)
    }
}

impl From<FunctionRule> for RuleSpec {
    fn from(rule: FunctionRule) -> Self {
        RuleSpec::Function(rule)
    }
}

/// The rules declared for one field path.
#[derive(Clone, Debug)]
pub enum RuleList {
    /// `"required|email|min:5"`.
    Piped(String),
    Specs(Vec<RuleSpec>),
}

impl RuleList {
    /// The rule specs in evaluation order. Empty piped tokens are dropped.
    pub fn specs(&self) -> Vec<RuleSpec> {
        match self {
            RuleList::Piped(rules) => split_rules(rules)
                .into_iter()
                .map(RuleSpec::Token)
                .collect(),
            RuleList::Specs(specs) => specs
                .iter()
                .filter(|spec| !matches!(spec, RuleSpec::Token(t) if t.is_empty()))
                .cloned()
                .collect(),
        }
    }
}

impl From<&str> for RuleList {
    fn from(rules: &str) -> Self {
        RuleList::Piped(rules.to_string())
    }
}

impl From<String> for RuleList {
    fn from(rules: String) -> Self {
        RuleList::Piped(rules)
    }
}

impl From<Vec<RuleSpec>> for RuleList {
    fn from(specs: Vec<RuleSpec>) -> Self {
        RuleList::Specs(specs)
    }
}

impl From<Vec<&str>> for RuleList {
    fn from(tokens: Vec<&str>) -> Self {
        RuleList::Specs(tokens.into_iter().map(RuleSpec::from).collect())
    }
}

/// Field path → rule list, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    fields: IndexMap<String, RuleList>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, rules: impl Into<RuleList>) -> Self {
        self.insert(field, rules);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, rules: impl Into<RuleList>) {
        self.fields.insert(field.into(), rules.into());
    }

    pub fn get(&self, field: &str) -> Option<&RuleList> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleList)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RuleList>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RuleSet {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<RuleList>, const N: usize> From<[(K, V); N]> for RuleSet {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Reads a rule set from a JSON tree.
///
/// The root must be an object. Each value is either a piped string or an
/// array whose items are token strings or `[name, [param, ...]]` pairs.
impl TryFrom<serde_json::Value> for RuleSet {
    type Error = ValidatorError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(map) = json else {
            return Err(ValidatorError::InvalidRules(json_kind(&json).to_string()));
        };

        let mut rules = RuleSet::new();
        for (field, list) in map {
            let list = match list {
                serde_json::Value::String(piped) => RuleList::Piped(piped),
                serde_json::Value::Array(items) => RuleList::Specs(
                    items
                        .into_iter()
                        .map(|item| json_rule_spec(&field, item))
                        .collect::<Result<_, _>>()?,
                ),
                other => {
                    return Err(ValidatorError::InvalidRules(format!(
                        "{} for field '{}'",
                        json_kind(&other),
                        field
                    )));
                }
            };
            rules.insert(field, list);
        }
        Ok(rules)
    }
}

fn json_rule_spec(field: &str, item: serde_json::Value) -> Result<RuleSpec, ValidatorError> {
    use serde_json::Value as Json;
    match item {
        Json::String(token) => Ok(RuleSpec::Token(token)),
        Json::Array(pair) => match pair.as_slice() {
            [Json::String(name), Json::Array(params)] => {
                let parameters = params
                    .iter()
                    .map(|p| match p {
                        Json::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                Ok(RuleSpec::Structured {
                    name: name.clone(),
                    parameters,
                })
            }
            _ => Err(ValidatorError::InvalidRules(format!(
                "malformed rule pair for field '{}'",
                field
            ))),
        },
        other => Err(ValidatorError::InvalidRules(format!(
            "{} in rule list for field '{}'",
            json_kind(&other),
            field
        ))),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "dict",
    }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Concrete field path → formatted errors, in evaluation order.
pub type ErrorMap = IndexMap<String, Vec<String>>;

/// Output of [`crate::Validator::validate_with`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Map(ErrorMap),
    Flat(Vec<String>),
}

impl Report {
    pub fn is_empty(&self) -> bool {
        match self {
            Report::Map(map) => map.is_empty(),
            Report::Flat(list) => list.is_empty(),
        }
    }

    /// All messages, field order then rule order.
    pub fn into_flat(self) -> Vec<String> {
        match self {
            Report::Map(map) => flatten(&map),
            Report::Flat(list) => list,
        }
    }

    pub fn as_map(&self) -> Option<&ErrorMap> {
        match self {
            Report::Map(map) => Some(map),
            Report::Flat(_) => None,
        }
    }
}

/// Concatenates every field's errors in field order.
pub fn flatten(errors: &ErrorMap) -> Vec<String> {
    errors.values().flatten().cloned().collect()
}

// ─── Value overrides ─────────────────────────────────────────────────────────

/// An entry of the value-override layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueOverride {
    /// Global: the key is a literal value token, this is its display label.
    Label(String),
    /// Scoped: the key is a wildcarded field path, this maps tokens to labels.
    Scoped(IndexMap<String, String>),
}

impl ValueOverride {
    pub fn scoped<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ValueOverride::Scoped(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for ValueOverride {
    fn from(label: &str) -> Self {
        ValueOverride::Label(label.to_string())
    }
}

impl From<String> for ValueOverride {
    fn from(label: String) -> Self {
        ValueOverride::Label(label)
    }
}
