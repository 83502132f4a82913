//! Turns a rule failure into its final message.
//!
//! Three caller-owned layers adjust the result. All of them are keyed by
//! the wildcard form of a path, so `items.3.name` is looked up as
//! `items.*.name`.
//!
//! - message overrides replace the template; a key is a rule name, a field
//!   pattern, or `pattern.rule`, and the most specific one wins;
//! - field overrides relabel any placeholder whose text is a field pattern;
//! - value overrides then relabel the `value`/`values` placeholders, either
//!   globally (a token → label entry) or within one field pattern.

use indexmap::IndexMap;

use crate::error::Result;
use crate::primitives::{FIELD_DELIMITER, interpolate_message, wildcard_form};
use crate::rule::{Failure, MessageValue, OTHER_KEY, VALUE_KEY, VALUES_KEY};
use crate::types::ValueOverride;

/// The override layers of a validator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Rule name, field pattern or `pattern.rule` → template.
    pub messages: IndexMap<String, String>,
    /// Field pattern → display label.
    pub fields: IndexMap<String, String>,
    /// Value token → label, or field pattern → table of token → label.
    pub values: IndexMap<String, ValueOverride>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.fields.is_empty() && self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.fields.clear();
        self.values.clear();
    }

    /// Formats `failure` of the rule `rule_name` on the concrete path `field`.
    ///
    /// A literal message is returned verbatim unless a message override
    /// applies, in which case the override is formatted like any template.
    ///
    /// # Errors
    ///
    /// `MessageFormat` when the template names a placeholder the failure
    /// does not provide.
    pub fn format(&self, rule_name: &str, field: &str, failure: Failure) -> Result<String> {
        let pattern = wildcard_form(field);
        let combined = format!("{}{}{}", pattern, FIELD_DELIMITER, rule_name);

        let overridden = [combined.as_str(), pattern.as_str(), rule_name]
            .into_iter()
            .find_map(|key| self.messages.get(key));

        let template = match overridden {
            Some(template) => template.clone(),
            None if failure.literal => return Ok(failure.message),
            None => failure.message,
        };

        let mut fields = failure.fields;

        let other = match fields.get(OTHER_KEY) {
            Some(MessageValue::Text(other)) => Some(wildcard_form(other)),
            _ => None,
        };

        for (_, value) in fields.iter_mut() {
            relabel(value, |text| self.fields.get(&wildcard_form(text)));
        }

        for key in [VALUE_KEY, VALUES_KEY] {
            if let Some(value) = fields.get_mut(key) {
                relabel(value, |token| self.value_label(&pattern, other.as_deref(), token));
            }
        }

        interpolate_message(&template, &fields.to_display_map())
    }

    /// Label for a value token: the table of the failing field first, then
    /// the table of the referenced field, then the global labels.
    fn value_label(&self, pattern: &str, other: Option<&str>, token: &str) -> Option<&String> {
        let scoped = |key: &str| match self.values.get(key) {
            Some(ValueOverride::Scoped(table)) => table.get(token),
            _ => None,
        };

        scoped(pattern)
            .or_else(|| other.and_then(scoped))
            .or_else(|| match self.values.get(token) {
                Some(ValueOverride::Label(label)) => Some(label),
                _ => None,
            })
    }
}

/// Replaces the text, or every list element, for which `label` has an entry.
fn relabel<'a>(value: &mut MessageValue, label: impl Fn(&str) -> Option<&'a String>) {
    match value {
        MessageValue::Text(text) => {
            if let Some(new) = label(text) {
                *text = new.clone();
            }
        }
        MessageValue::List(items) => {
            for item in items.iter_mut() {
                if let Some(new) = label(item) {
                    *item = new.clone();
                }
            }
        }
    }
}
