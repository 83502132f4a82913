//! Rule tokens and rule-set documents.

use crate::error::{ParseError, ParseErrorKind, ValidatorError};
use crate::primitives::{PARAM_DELIMITER, PARAMS_DELIMITER, RULE_DELIMITER};
use crate::rule::Rule;
use crate::types::{RuleSet, RuleSpec};

// ─── Tokens ─────────────────────────────────────────────────────────────────

/// Splits a piped rule list. Empty tokens (`a||b`, a leading or trailing
/// pipe) are dropped.
pub fn split_rules(rules: &str) -> Vec<String> {
    rules
        .split(RULE_DELIMITER)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits `name:p1,p2` into its name and parameters.
///
/// Only the first `:` separates the name, so parameters may contain colons
/// (`date_time:%H:%M`). A token without `:` has no parameters; `name:` has a
/// single empty one.
pub fn parse_rule_token(token: &str) -> (String, Vec<String>) {
    match token.split_once(PARAM_DELIMITER) {
        Some((name, params)) => (
            name.to_string(),
            params.split(PARAMS_DELIMITER).map(str::to_string).collect(),
        ),
        None => (token.to_string(), Vec::new()),
    }
}

/// Name and parameters of any rule spec. Function rules have no parameters.
pub fn parse_rule_spec(spec: &RuleSpec) -> (String, Vec<String>) {
    match spec {
        RuleSpec::Token(token) => parse_rule_token(token),
        RuleSpec::Structured { name, parameters } => (name.clone(), parameters.clone()),
        RuleSpec::Function(rule) => (rule.name().to_string(), Vec::new()),
    }
}

// ─── Documents ──────────────────────────────────────────────────────────────

/// Parses a rule set authored as YAML (JSON is accepted too).
///
/// The root must be a mapping of field paths to either a piped string or a
/// list whose items are token strings or `[name, [param, ...]]` pairs:
///
/// ```yaml
/// email: required|email
/// tags.*.name: [required, "min:2"]
/// comment: [[prohibited_with, ["field,with,commas"]]]
/// ```
///
/// # Errors
///
/// `ValidatorError::Parse` when the text is not a single YAML document,
/// `ValidatorError::InvalidRules` when it is not shaped like a rule set.
pub fn parse_rules(input: &str) -> Result<RuleSet, ValidatorError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            path: None,
            line: None,
            column: None,
        }
        .into());
    }

    check_multi_document(input)?;

    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
            path: None,
            line: None,
            column: None,
        }
    })?;

    let rules = RuleSet::try_from(value)?;
    tracing::debug!(fields = rules.len(), "parsed rule set");
    Ok(rules)
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut doc_count = 0;
    for (line_num, line) in input.lines().enumerate() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            doc_count += 1;
            if doc_count > 1 {
                return Err(ParseError {
                    kind: ParseErrorKind::Syntax,
                    message: "multi-document YAML is not supported".to_string(),
                    path: None,
                    line: Some(line_num + 1),
                    column: Some(1),
                });
            }
        }
    }
    Ok(())
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("type") || lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
