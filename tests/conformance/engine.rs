use super::common::record;
use rulebook::{
    FunctionRule, Plugin, Report, Rule, RuleSet, RuleSpec, Validator, ValidatorError, Value,
    flatten,
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn signup() -> (Value, RuleSet) {
    let data = record(json!({
        "email": "bad",
        "age": 3,
        "name": "",
        "tags": [{"label": "a"}, {"label": "ok"}, {}]
    }));
    let rules = RuleSet::from([
        ("email", "required|email"),
        ("age", "integer|min:5"),
        ("name", "required|min:2"),
        ("tags.*.label", "required|min:2"),
    ]);
    (data, rules)
}

// ─── Report shape ────────────────────────────────────────────────────────────

#[test]
fn minimum_value_message() {
    let errors = rulebook::validate(&record(json!({"age": 3})), &RuleSet::from([("age", "min:5")]))
        .unwrap();
    assert_eq!(errors["age"], vec!["The age field has to have a minimum value of 5."]);
}

#[test]
fn validation_is_repeatable() {
    let (data, rules) = signup();
    let validator = Validator::new();
    let first = validator.validate(&data, &rules).unwrap();
    let second = validator.validate(&data, &rules).unwrap();
    assert_eq!(first, second);
    assert!(first.keys().eq(second.keys()));
}

#[test]
fn flat_report_concatenates_field_order() {
    let (data, rules) = signup();
    let validator = Validator::new();
    let errors = validator.validate(&data, &rules).unwrap();
    let flat = validator.validate_flat(&data, &rules).unwrap();

    assert_eq!(flat, flatten(&errors));
    assert_eq!(
        flat,
        vec![
            "The email field has to be a valid email address.",
            "The age field has to have a minimum value of 5.",
            "The name field is required.",
            "The tags.0.label field has to be at least 2 characters.",
            "The tags.2.label field is required.",
        ]
    );
}

#[test]
fn report_modes() {
    let (data, rules) = signup();
    let validator = Validator::new();

    let map = validator.validate_with(&data, &rules, false).unwrap();
    let flat = validator.validate_with(&data, &rules, true).unwrap();
    assert!(matches!(map, Report::Map(_)));
    assert!(flat.as_map().is_none());
    assert_eq!(map.clone().into_flat(), flat.into_flat());
    assert_eq!(map.as_map().map(|m| m.len()), Some(5));
}

#[test]
fn valid_record_reports_nothing() {
    let data = record(json!({"email": "john@example.com", "age": 30, "tags": []}));
    let rules = RuleSet::from([
        ("email", "required|email"),
        ("age", "integer|min:18|max:130"),
        ("tags", "list|max:3"),
        ("tags.*.label", "required"),
    ]);
    let report = Validator::new().validate_with(&data, &rules, true).unwrap();
    assert!(report.is_empty());
}

// ─── Skipping and stopping ───────────────────────────────────────────────────

fn counting_rule(calls: &Arc<AtomicUsize>) -> FunctionRule {
    let calls = Arc::clone(calls);
    FunctionRule::new(move |_, _, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        None
    })
}

#[test]
fn absent_values_skip_non_implicit_rules() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rules = RuleSet::new()
        .with("missing", vec![RuleSpec::from(counting_rule(&calls))])
        .with("null", vec![RuleSpec::from(counting_rule(&calls))])
        .with("set", vec![RuleSpec::from(counting_rule(&calls))]);

    let errors = Validator::new()
        .validate(&record(json!({"null": null, "set": 0})), &rules)
        .unwrap();
    assert!(errors.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn implicit_function_rules_see_absent_fields() {
    let seen = FunctionRule::new(|field, value, _| match value {
        None => Some(format!("{} is absent", field)),
        Some(_) => None,
    })
    .implicit(true);
    let rules = RuleSet::new().with("nick", vec![RuleSpec::from(seen)]);

    let errors = rulebook::validate(&record(json!({})), &rules).unwrap();
    assert_eq!(errors["nick"], vec!["nick is absent"]);
}

#[test]
fn stopping_failure_skips_the_rest_of_the_field_only() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rules = RuleSet::new()
        .with(
            "a",
            vec![RuleSpec::from("required"), RuleSpec::from(counting_rule(&calls))],
        )
        .with("b", vec![RuleSpec::from(counting_rule(&calls))]);

    let errors = Validator::new()
        .validate(&record(json!({"a": "", "b": 1})), &rules)
        .unwrap();
    assert_eq!(errors["a"], vec!["The a field is required."]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn stop_applies_per_concrete_path() {
    let rules = RuleSet::from([("rows.*.n", "required|integer")]);
    let data = record(json!({"rows": [{"n": ""}, {"n": "x"}, {"n": 1}]}));
    let errors = rulebook::validate(&data, &rules).unwrap();

    assert_eq!(errors["rows.0.n"], vec!["The rows.0.n field is required."]);
    assert_eq!(errors["rows.1.n"], vec!["The rows.1.n field must be an integer."]);
    assert!(!errors.contains_key("rows.2.n"));
}

// ─── Function rules ──────────────────────────────────────────────────────────

#[test]
fn function_rule_message_is_verbatim() {
    let braces = FunctionRule::new(|_, _, _| Some("{not a placeholder}".to_string()));
    let rules = RuleSet::new().with("x", vec![RuleSpec::from(braces)]);
    let mut validator = Validator::new();
    validator.override_field("x", "Ex");

    let errors = validator.validate(&record(json!({"x": 1})), &rules).unwrap();
    assert_eq!(errors["x"], vec!["{not a placeholder}"]);
}

#[test]
fn function_rule_reads_other_fields() {
    let matches = FunctionRule::new(|_, value, ctx| {
        (value != ctx.value("password").as_ref()).then(|| "Passwords differ.".to_string())
    })
    .named("confirmed");
    let rules = RuleSet::new().with("confirmation", vec![RuleSpec::from(matches)]);

    let data = record(json!({"password": "hunter2", "confirmation": "hunter3"}));
    let mut validator = Validator::new();
    assert_eq!(
        validator.validate(&data, &rules).unwrap()["confirmation"],
        vec!["Passwords differ."]
    );

    validator.override_message("confirmed", "The {field} does not match.");
    assert_eq!(
        validator.validate(&data, &rules).unwrap()["confirmation"],
        vec!["The confirmation does not match."]
    );
}

#[test]
fn unnamed_function_rules_share_one_override_key() {
    let odd = FunctionRule::new(|_, _, _| Some("Odd.".to_string()));
    let short = FunctionRule::new(|_, _, _| Some("Short.".to_string()));
    let long = FunctionRule::new(|_, _, _| Some("Long.".to_string())).named("long");
    let rules = RuleSet::new()
        .with("a", vec![RuleSpec::from(odd)])
        .with("b", vec![RuleSpec::from(short)])
        .with("c", vec![RuleSpec::from(long)]);

    let mut validator = Validator::new();
    validator.override_message(FunctionRule::DEFAULT_NAME, "The {field} field is invalid.");
    let errors = validator.validate(&record(json!({"a": 1, "b": 2, "c": 3})), &rules).unwrap();

    assert_eq!(errors["a"], vec!["The a field is invalid."]);
    assert_eq!(errors["b"], vec!["The b field is invalid."]);
    assert_eq!(errors["c"], vec!["Long."]);
}

#[test]
fn stopping_function_rule() {
    let never = FunctionRule::new(|_, _, _| Some("no".to_string())).stop(true);
    let rules = RuleSet::new().with("x", vec![RuleSpec::from(never), RuleSpec::from("string")]);
    let errors = rulebook::validate(&record(json!({"x": 1})), &rules).unwrap();
    assert_eq!(errors["x"], vec!["no"]);
}

// ─── Registry ────────────────────────────────────────────────────────────────

struct Slugs;

impl Plugin for Slugs {
    fn rules(&self) -> Vec<Arc<dyn Rule>> {
        let slug = FunctionRule::new(|field, value, _| match value {
            Some(Value::String(s))
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '-') =>
            {
                None
            }
            _ => Some(format!("The {} field must be a slug.", field)),
        })
        .named("slug");
        vec![Arc::new(slug)]
    }
}

#[test]
fn plugin_rules_are_usable_by_name() {
    let validator = Validator::with_plugins(&[&Slugs]).unwrap();
    let rules = RuleSet::from([("a", "slug"), ("b", "required|slug")]);
    let errors = validator
        .validate(&record(json!({"a": "hello-world", "b": "Hello World"})), &rules)
        .unwrap();

    assert!(!errors.contains_key("a"));
    assert_eq!(errors["b"], vec!["The b field must be a slug."]);
}

#[test]
fn registered_names_are_unique() {
    let mut validator = Validator::new();
    let err = validator
        .register_rule(FunctionRule::new(|_, _, _| None).named("required"))
        .unwrap_err();
    assert_eq!(err, ValidatorError::RuleNameAlreadyExists("required".into()));

    let err = validator
        .register_rule(FunctionRule::new(|_, _, _| None).named(""))
        .unwrap_err();
    assert!(matches!(err, ValidatorError::MissingRuleName(_)));

    validator
        .register_rule(FunctionRule::new(|_, _, _| None).named("anything"))
        .unwrap();
    assert!(validator.registry().exists("anything"));
}

#[test]
fn every_builtin_is_registered() {
    let validator = Validator::new();
    for name in [
        "required", "required_with", "required_without", "required_if", "required_unless",
        "filled", "not_with", "prohibited", "prohibited_if", "prohibited_unless",
        "prohibited_with", "string", "integer", "float", "decimal", "boolean", "list", "dict",
        "min", "max", "size", "email", "url", "ip", "uuid4", "json", "alpha_num",
        "alpha_num_space", "uppercase", "accepted", "regex", "starts_with", "ends_with", "in", "date_time",
        "before", "before_or_equal", "after", "after_or_equal",
    ] {
        assert!(validator.registry().exists(name), "missing built-in rule {}", name);
    }
}

// ─── Sharing ─────────────────────────────────────────────────────────────────

#[test]
fn one_validator_serves_many_threads() {
    let validator = Validator::new();
    let rules = RuleSet::from([("n", "integer|min:10")]);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|i| {
                let validator = &validator;
                let rules = &rules;
                scope.spawn(move || validator.validate(&record(json!({"n": i * 3})), rules))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let errors = handle.join().unwrap().unwrap();
            assert_eq!(errors.contains_key("n"), i * 3 < 10, "thread {}", i);
        }
    });
}

// ─── Predicates ──────────────────────────────────────────────────────────────

#[test]
fn stand_alone_predicates() {
    assert!(Validator::valid_email("john@example.com"));
    assert!(!Validator::valid_email(5));
    assert!(Validator::valid_url("https://example.com"));
    assert!(Validator::valid_ip("2001:db8::1"));
    assert!(Validator::valid_uuid4("c3b4f5a2-6e2d-4f5b-9c1a-2b3c4d5e6f70"));
    assert!(Validator::valid_integer(5));
    assert!(!Validator::valid_integer(true));
    assert!(Validator::valid_float(0.5));
    assert!(Validator::valid_string("x"));
    assert!(Validator::valid_boolean(false));
    assert!(Validator::valid_json("[1, 2]"));
    assert!(Validator::valid_alpha_num("abc123"));
    assert!(Validator::valid_alpha_num_space("abc 123"));
    assert!(Validator::valid_list(vec![1, 2]));
    assert!(!Validator::valid_dict(vec![1, 2]));
    assert!(Validator::valid_dict(record(json!({"a": 1}))));
    assert!(Validator::valid_date_time("2019-08-24 16:28:00", None));
    assert!(Validator::valid_date_time("24.08.2019", Some("%d.%m.%Y")));
    assert!(!Validator::valid_date_time("2019-02-30 00:00:00", None));
}
