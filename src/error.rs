use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind for rule-set document parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
}

/// Produced by `parse_rules` when a rule-set document cannot be read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column, &self.path) {
            (Some(line), Some(col), _) => write!(f, "{}:{}: {}", line, col, self.message),
            (_, _, Some(path)) => write!(f, "{}: {}", path, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Configuration errors raised by the engine.
///
/// None of these describe a record that failed validation. Those end up as
/// strings in the error report. Every variant here means the rule set, the
/// registry, or the shape of the input is wrong, and the whole call is
/// abandoned without a partial report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// A rule set referenced a rule name that is not registered.
    #[error("the '{0}' rule does not exist")]
    RuleNotFound(String),

    /// A rule with this name is already registered.
    #[error("the rule name '{0}' already exists")]
    RuleNameAlreadyExists(String),

    /// A rule reported an empty name at registration.
    #[error("the rule '{0}' is missing the 'name' attribute")]
    MissingRuleName(String),

    /// The data could not be viewed as a mapping.
    #[error("expected a map or an object that can be viewed as a map, got '{0}'")]
    InvalidData(String),

    /// The rule set was not a mapping of field paths to rule lists.
    #[error("expected a map of field rules, got '{0}'")]
    InvalidRules(String),

    /// A before/after style rule could not determine a usable date/time.
    #[error("invalid date time format")]
    InvalidDateTimeFormat,

    /// A rule received parameters it cannot work with.
    #[error("invalid parameters for the '{rule}' rule: {message}")]
    InvalidParameter { rule: String, message: String },

    /// A `regex` rule parameter did not compile.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// A message template referenced a placeholder with no value.
    #[error("message template '{template}' references unknown placeholder '{placeholder}'")]
    MessageFormat {
        template: String,
        placeholder: String,
    },

    /// A rule-set document failed to parse.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl ValidatorError {
    pub(crate) fn invalid_parameter(rule: &str, message: impl Into<String>) -> Self {
        ValidatorError::InvalidParameter {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ValidatorError>;
