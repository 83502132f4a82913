//! Declarative validation of records against per-field rule strings.
//!
//! A rule set maps field paths to rule lists such as `"required|email"`.
//! Paths are dot-separated and may contain `*` segments that stand for every
//! element of a list. Validation produces the failure messages of every
//! concrete field, in order:
//!
//! ```text
//! data + RuleSet → expand wildcards → rule lookup → evaluate → format → ErrorMap
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rulebook::{RuleSet, Value};
//!
//! let data = Value::from(serde_json::json!({
//!     "email": "bad",
//!     "tags": [{"name": "rust"}, {"name": ""}]
//! }));
//! let rules = RuleSet::from([
//!     ("email", "required|email"),
//!     ("tags.*.name", "required|min:2"),
//! ]);
//!
//! let errors = rulebook::validate(&data, &rules).expect("valid configuration");
//! assert_eq!(
//!     errors["email"],
//!     vec!["The email field has to be a valid email address."]
//! );
//! assert_eq!(errors["tags.1.name"], vec!["The tags.1.name field is required."]);
//! assert!(!errors.contains_key("tags.0.name"));
//! ```
//!
//! Messages can be reworded per rule, per field pattern or per
//! `pattern.rule`, and the field names and values they display can be
//! relabelled. See [`Validator`].

pub mod enums;
pub mod error;
pub mod format;
pub mod messages;
pub mod parse;
pub mod primitives;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod types;
pub mod validator;

pub use error::*;
pub use types::*;

pub use format::Overrides;
pub use parse::parse_rules;
pub use registry::RuleRegistry;
pub use rule::{Failure, FunctionRule, MessageFields, MessageValue, Rule, RuleContext, Verdict};
pub use validator::{Plugin, Validator};

use std::sync::LazyLock;

static DEFAULT_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Validates `data` with the built-in rules and no overrides.
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate(data: &Value, rules: &RuleSet) -> Result<ErrorMap> {
    DEFAULT_VALIDATOR.validate(data, rules)
}
