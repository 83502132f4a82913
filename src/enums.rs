//! Closed enumerations used by the value model and the bounds rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime category of a [`crate::Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Decimal,
    String,
    DateTime,
    Date,
    Uuid,
    List,
    Dict,
    Object,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Decimal => "decimal",
            ValueKind::String => "string",
            ValueKind::DateTime => "date_time",
            ValueKind::Date => "date",
            ValueKind::Uuid => "uuid",
            ValueKind::List => "list",
            ValueKind::Dict => "dict",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a bound a `min`/`max`/`size` rule enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
    Exact,
}

impl Bound {
    /// The rule name, which is also the message placeholder key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
            Bound::Exact => "size",
        }
    }

    pub(crate) fn holds<T: PartialOrd>(&self, actual: T, expected: T) -> bool {
        match self {
            Bound::Min => actual >= expected,
            Bound::Max => actual <= expected,
            Bound::Exact => actual == expected,
        }
    }
}

/// Ordering a temporal rule requires between the field and its reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Temporal {
    Before,
    BeforeOrEqual,
    After,
    AfterOrEqual,
}

impl Temporal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temporal::Before => "before",
            Temporal::BeforeOrEqual => "before_or_equal",
            Temporal::After => "after",
            Temporal::AfterOrEqual => "after_or_equal",
        }
    }

    pub(crate) fn holds<T: PartialOrd>(&self, field: T, reference: T) -> bool {
        match self {
            Temporal::Before => field < reference,
            Temporal::BeforeOrEqual => field <= reference,
            Temporal::After => field > reference,
            Temporal::AfterOrEqual => field >= reference,
        }
    }
}

/// The presence constraint a presence-family rule enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Required,
    RequiredWith,
    RequiredWithout,
    RequiredIf,
    RequiredUnless,
    Filled,
    NotWith,
    Prohibited,
    ProhibitedIf,
    ProhibitedUnless,
    ProhibitedWith,
}

impl Presence {
    pub const ALL: [Presence; 11] = [
        Presence::Required,
        Presence::RequiredWith,
        Presence::RequiredWithout,
        Presence::RequiredIf,
        Presence::RequiredUnless,
        Presence::Filled,
        Presence::NotWith,
        Presence::Prohibited,
        Presence::ProhibitedIf,
        Presence::ProhibitedUnless,
        Presence::ProhibitedWith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::RequiredWith => "required_with",
            Presence::RequiredWithout => "required_without",
            Presence::RequiredIf => "required_if",
            Presence::RequiredUnless => "required_unless",
            Presence::Filled => "filled",
            Presence::NotWith => "not_with",
            Presence::Prohibited => "prohibited",
            Presence::ProhibitedIf => "prohibited_if",
            Presence::ProhibitedUnless => "prohibited_unless",
            Presence::ProhibitedWith => "prohibited_with",
        }
    }

    /// Rules that must run when the field is absent.
    pub fn is_implicit(&self) -> bool {
        matches!(
            self,
            Presence::Required
                | Presence::RequiredWith
                | Presence::RequiredWithout
                | Presence::RequiredIf
                | Presence::RequiredUnless
                | Presence::Filled
        )
    }

    pub fn is_stop(&self) -> bool {
        !matches!(
            self,
            Presence::Prohibited
                | Presence::ProhibitedIf
                | Presence::ProhibitedUnless
                | Presence::ProhibitedWith
        )
    }
}
