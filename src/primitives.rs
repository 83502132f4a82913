//! Shared primitives: field-path resolution, wildcard expansion, emptiness
//! checks, loose equality and message interpolation.

use indexmap::IndexMap;
use std::borrow::Cow;

use crate::error::ValidatorError;
use crate::types::Value;

/// Separates the segments of a field path.
pub const FIELD_DELIMITER: char = '.';
/// A path segment standing for every element of a list.
pub const WILDCARD: &str = "*";
/// Separates rule tokens in a piped rule list.
pub const RULE_DELIMITER: char = '|';
/// Separates a rule name from its parameters.
pub const PARAM_DELIMITER: char = ':';
/// Separates rule parameters.
pub const PARAMS_DELIMITER: char = ',';

// ─── Path resolution ────────────────────────────────────────────────────────

/// Resolves a dot-path against a value tree.
///
/// Returns the value at the path, or `None` if any segment fails to resolve.
/// A numeric segment indexes a list by position and is an ordinary key for a
/// map. Attribute bags are walked through their attribute view. Empty path
/// returns the root value.
pub fn resolve_path(path: &str, root: &Value) -> Option<Value> {
    with_resolved(path, root, Value::clone)
}

/// Resolves `path` and hands the value to `f` without cloning it out of the
/// tree.
pub fn with_resolved<R>(path: &str, root: &Value, f: impl FnOnce(&Value) -> R) -> Option<R> {
    if path.is_empty() {
        return Some(f(root));
    }

    let mut current = Cow::Borrowed(root);
    for segment in path.split(FIELD_DELIMITER) {
        current = match current {
            Cow::Borrowed(node) => child(node, segment)?,
            Cow::Owned(node) => Cow::Owned(child(&node, segment)?.into_owned()),
        };
    }
    Some(f(&current))
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match node {
        Value::Map(map) => map.get(segment).map(Cow::Borrowed),
        Value::List(items) => list_index(segment)
            .and_then(|i| items.get(i))
            .map(Cow::Borrowed),
        Value::Object(bag) => bag.attribute(segment).map(Cow::Owned),
        _ => None,
    }
}

fn list_index(segment: &str) -> Option<usize> {
    if is_numeric_segment(segment) {
        segment.parse().ok()
    } else {
        None
    }
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

// ─── Wildcard expansion ─────────────────────────────────────────────────────

/// Expands every `*` segment of `path` against the lists found in `root`.
///
/// A path without wildcards yields itself. Otherwise the prefix before the
/// first wildcard must resolve to a list; each index produces one concrete
/// path, expanded recursively for later wildcards. A missing, null, empty or
/// non-list prefix yields no paths.
pub fn expand_wildcards(path: &str, root: &Value) -> Vec<String> {
    let segments: Vec<&str> = path.split(FIELD_DELIMITER).collect();
    let Some(pos) = segments.iter().position(|s| *s == WILDCARD) else {
        return vec![path.to_string()];
    };

    let prefix = segments[..pos].join(".");
    let suffix = segments[pos + 1..].join(".");
    let len = with_resolved(&prefix, root, |v| v.as_list().map(<[Value]>::len))
        .flatten()
        .unwrap_or(0);

    let mut expanded = Vec::new();
    for index in 0..len {
        let concrete = [prefix.as_str(), &index.to_string(), suffix.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        expanded.extend(expand_wildcards(&concrete, root));
    }

    tracing::trace!(path, count = expanded.len(), "expanded wildcard path");
    expanded
}

/// Replaces every numeric segment with the wildcard token:
/// `list.0.name` → `list.*.name`.
pub fn wildcard_form(path: &str) -> String {
    path.split(FIELD_DELIMITER)
        .map(|segment| {
            if is_numeric_segment(segment) {
                WILDCARD
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

// ─── Presence ───────────────────────────────────────────────────────────────

/// The path resolves to a non-null value.
pub fn is_present(path: &str, root: &Value) -> bool {
    with_resolved(path, root, |v| !v.is_null()).unwrap_or(false)
}

/// The path does not resolve at all. A key holding null is not missing.
pub fn is_missing(path: &str, root: &Value) -> bool {
    with_resolved(path, root, |_| ()).is_none()
}

/// Null, blank strings, and empty lists and maps are empty. An unresolved
/// value (`None`) is empty too.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::List(items)) => items.is_empty(),
        Some(Value::Map(map)) => map.is_empty(),
        Some(_) => false,
    }
}

pub fn is_missing_or_empty(path: &str, root: &Value) -> bool {
    with_resolved(path, root, |v| is_empty_value(Some(v))).unwrap_or(true)
}

/// Case-insensitive comparison of a rule parameter with a value's display
/// form. An unresolved value never matches.
pub fn loose_equal(expected: &str, actual: Option<&Value>) -> bool {
    actual.is_some_and(|v| v.to_string().eq_ignore_ascii_case(expected))
}

/// Case-sensitive comparison of a rule parameter with a value's literal
/// form, where booleans read `True` and `False`. An unresolved value never
/// matches.
pub fn literal_equal(expected: &str, actual: Option<&Value>) -> bool {
    actual.is_some_and(|v| match v {
        Value::Bool(true) => expected == "True",
        Value::Bool(false) => expected == "False",
        other => other.to_string() == expected,
    })
}

// ─── Message interpolation ──────────────────────────────────────────────────

/// Substitutes `{name}` placeholders in a message template.
///
/// `{{` and `}}` produce literal braces. A placeholder without an entry in
/// `fields` is an error, never an empty substitution.
pub fn interpolate_message(
    template: &str,
    fields: &IndexMap<String, String>,
) -> Result<String, ValidatorError> {
    let mut result = String::with_capacity(template.len());
    let mut remaining = template;

    while let Some(start) = remaining.find(['{', '}']) {
        result.push_str(&remaining[..start]);
        let rest = &remaining[start..];

        if rest.starts_with("{{") {
            result.push('{');
            remaining = &rest[2..];
        } else if rest.starts_with("}}") {
            result.push('}');
            remaining = &rest[2..];
        } else if let Some(after_open) = rest.strip_prefix('{') {
            let Some(end) = after_open.find('}') else {
                return Err(ValidatorError::MessageFormat {
                    template: template.to_string(),
                    placeholder: after_open.to_string(),
                });
            };
            let key = &after_open[..end];
            match fields.get(key) {
                Some(value) => result.push_str(value),
                None => {
                    return Err(ValidatorError::MessageFormat {
                        template: template.to_string(),
                        placeholder: key.to_string(),
                    });
                }
            }
            remaining = &after_open[end + 1..];
        } else {
            // Lone closing brace
            result.push('}');
            remaining = &rest[1..];
        }
    }
    result.push_str(remaining);

    Ok(result)
}
