use super::common::record;
use rulebook::{RuleSet, Validator, ValidatorError, ValueOverride};
use serde_json::json;

#[test]
fn message_override_precedence() {
    let data = record(json!({"age": 3}));
    let rules = RuleSet::from([("age", "min:5")]);
    let mut validator = Validator::new();

    validator.override_message("min", "{field} is below {min}.");
    assert_eq!(validator.validate(&data, &rules).unwrap()["age"], vec!["age is below 5."]);

    validator.override_message("age", "Age is wrong.");
    assert_eq!(validator.validate(&data, &rules).unwrap()["age"], vec!["Age is wrong."]);

    validator.override_message("age.min", "Too young.");
    assert_eq!(validator.validate(&data, &rules).unwrap()["age"], vec!["Too young."]);

    validator.clear_overrides();
    assert_eq!(
        validator.validate(&data, &rules).unwrap()["age"],
        vec!["The age field has to have a minimum value of 5."]
    );
}

#[test]
fn field_pattern_overrides_apply_to_every_index() {
    let data = record(json!({"people": [{"age": 30}, {"age": 4}, {"age": 2}]}));
    let rules = RuleSet::from([("people.*.age", "min:18")]);
    let mut validator = Validator::new();
    validator
        .override_field("people.*.age", "age")
        .override_message("people.*.age.min", "Each person's {field} must be at least {min}.");

    let errors = validator.validate(&data, &rules).unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["people.1.age"], vec!["Each person's age must be at least 18."]);
    assert_eq!(errors["people.2.age"], vec!["Each person's age must be at least 18."]);
}

#[test]
fn field_labels_apply_to_referenced_fields() {
    let data = record(json!({"first_name": "Ada"}));
    let rules = RuleSet::from([("last_name", "required_with:first_name,middle_name")]);
    let mut validator = Validator::new();
    validator
        .override_field("last_name", "last name")
        .override_field("first_name", "first name");

    let errors = validator.validate(&data, &rules).unwrap();
    assert_eq!(
        errors["last_name"],
        vec![
            "The last name field is required if any of the following fields are present: \
             first name, middle_name."
        ]
    );
}

#[test]
fn global_value_labels() {
    let data = record(json!({"role": "guest"}));
    let rules = RuleSet::from([("role", "in:adm,usr")]);
    let mut validator = Validator::new();
    validator
        .override_value("adm", "administrator")
        .override_value("usr", "user");

    assert_eq!(
        validator.validate(&data, &rules).unwrap()["role"],
        vec!["The role field must be one of the following values: administrator, user."]
    );
}

#[test]
fn field_scoped_value_labels_win_over_global_ones() {
    let data = record(json!({"kind": "b2b", "plan": "x"}));
    let rules = RuleSet::from([("vat", "required_if:kind,b2b"), ("plan", "in:b2b,b2c")]);
    let mut validator = Validator::new();
    validator
        .override_value("b2b", "B2B")
        .override_field_values("kind", [("b2b", "business")]);

    let errors = validator.validate(&data, &rules).unwrap();
    // The condition value is relabelled through the table of the field it
    // references.
    assert_eq!(
        errors["vat"],
        vec!["The vat field is required if the kind field equals business."]
    );
    assert_eq!(
        errors["plan"],
        vec!["The plan field must be one of the following values: B2B, b2c."]
    );
}

#[test]
fn value_tables_are_keyed_by_pattern() {
    let data = record(json!({"items": [{"size": "xl"}]}));
    let rules = RuleSet::from([("items.*.size", "in:s,m,l")]);
    let mut validator = Validator::new();
    validator.value_overrides_mut().insert(
        "items.*.size".into(),
        ValueOverride::scoped([("s", "small"), ("m", "medium"), ("l", "large")]),
    );

    assert_eq!(
        validator.validate(&data, &rules).unwrap()["items.0.size"],
        vec!["The items.0.size field must be one of the following values: small, medium, large."]
    );
}

#[test]
fn override_tables_are_editable_in_place() {
    let mut validator = Validator::new();
    validator
        .message_overrides_mut()
        .insert("required".into(), "Missing {field}.".into());
    validator
        .field_overrides_mut()
        .insert("email".into(), "e-mail".into());
    assert!(!validator.overrides().is_empty());

    let errors = validator
        .validate(&record(json!({})), &RuleSet::from([("email", "required")]))
        .unwrap();
    assert_eq!(errors["email"], vec!["Missing e-mail."]);
}

#[test]
fn literal_braces_survive_formatting() {
    let mut validator = Validator::new();
    validator.override_message("required", "{{{field}}} is required.");
    let errors = validator
        .validate(&record(json!({})), &RuleSet::from([("name", "required")]))
        .unwrap();
    assert_eq!(errors["name"], vec!["{name} is required."]);
}

#[test]
fn unknown_placeholder_fails_the_call() {
    let mut validator = Validator::new();
    validator.override_message("required", "{field} needs {nothing}.");
    let err = validator
        .validate(&record(json!({})), &RuleSet::from([("name", "required")]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidatorError::MessageFormat {
            template: "{field} needs {nothing}.".into(),
            placeholder: "nothing".into(),
        }
    );
}

#[test]
fn overrides_do_not_leak_between_validators() {
    let mut custom = Validator::new();
    custom.override_message("required", "Nope.");
    let plain = Validator::new();

    let rules = RuleSet::from([("x", "required")]);
    let data = record(json!({}));
    assert_eq!(custom.validate(&data, &rules).unwrap()["x"], vec!["Nope."]);
    assert_eq!(
        plain.validate(&data, &rules).unwrap()["x"],
        vec!["The x field is required."]
    );
    assert_eq!(
        rulebook::validate(&data, &rules).unwrap()["x"],
        vec!["The x field is required."]
    );
}
