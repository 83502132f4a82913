use proptest::prelude::*;
use rulebook::{RuleSet, Validator, Value, flatten};
use serde_json::json;

fn arb_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        (-1000i64..1000).prop_map(|i| json!(i)),
        (-1000.0f64..1000.0).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 @._-]{0,12}".prop_map(serde_json::Value::String),
        prop::collection::vec("[a-z]{0,3}", 0..4).prop_map(|items| json!(items)),
    ]
}

/// A record over a small fixed set of field names, so that rules hit.
fn arb_record() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::vec(
        (prop::sample::select(vec!["a", "b", "c", "d"]), arb_leaf()),
        0..4,
    )
    .prop_map(|pairs| {
        serde_json::Value::Object(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    })
}

const RULES: &[&str] = &[
    "required", "filled", "prohibited", "string", "integer", "float", "boolean", "list", "dict",
    "min:2", "max:5", "size:3", "email", "url", "ip", "uuid4", "json", "alpha_num",
    "alpha_num_space", "accepted", "in:a,b,1", "starts_with:a", "ends_with:z",
    "required_with:b", "required_without:c", "required_if:b,x", "required_unless:c,1",
    "not_with:d", "prohibited_if:b,true", "prohibited_unless:c,a", "prohibited_with:d",
];

/// Rules that never run on an absent value.
const SKIPPED_WHEN_ABSENT: &[&str] = &[
    "prohibited", "string", "integer", "float", "boolean", "list", "dict", "min:2", "max:5",
    "size:3", "email", "url", "ip", "uuid4", "json", "alpha_num", "alpha_num_space",
    "accepted", "in:a,b,1", "starts_with:a", "ends_with:z", "not_with:d",
    "prohibited_if:b,true", "prohibited_unless:c,a", "prohibited_with:d",
];

fn arb_rules() -> impl Strategy<Value = RuleSet> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["a", "b", "c", "d"]),
            prop::collection::vec(prop::sample::select(RULES), 0..4),
        ),
        0..4,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .map(|(field, tokens)| (field, tokens.join("|")))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn flat_report_is_the_flattened_map(data in arb_record(), rules in arb_rules()) {
        let data = Value::from(data);
        let validator = Validator::new();
        let errors = validator.validate(&data, &rules).unwrap();
        prop_assert_eq!(validator.validate_flat(&data, &rules).unwrap(), flatten(&errors));
    }

    #[test]
    fn validation_is_deterministic(data in arb_record(), rules in arb_rules()) {
        let data = Value::from(data);
        let first = rulebook::validate(&data, &rules).unwrap();
        let second = rulebook::validate(&data, &rules).unwrap();
        prop_assert!(first.keys().eq(second.keys()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_field_with_errors_has_rules(data in arb_record(), rules in arb_rules()) {
        let errors = rulebook::validate(&Value::from(data), &rules).unwrap();
        for (field, messages) in &errors {
            prop_assert!(rules.contains(field));
            prop_assert!(!messages.is_empty());
        }
    }

    #[test]
    fn absent_fields_skip_non_implicit_rules(
        tokens in prop::collection::vec(prop::sample::select(SKIPPED_WHEN_ABSENT), 1..5),
        data in arb_record(),
    ) {
        let rules = RuleSet::from([("missing", tokens.join("|"))]);
        let errors = rulebook::validate(&Value::from(data), &rules).unwrap();
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn required_reports_each_empty_element(cells in prop::collection::vec(prop::option::of("[a-z]{0,3}"), 0..8)) {
        let expected = cells
            .iter()
            .filter(|cell| cell.as_deref().is_none_or(str::is_empty))
            .count();
        let rows: Vec<_> = cells.iter().map(|cell| json!({"name": cell})).collect();

        let rules = RuleSet::from([("rows.*.name", "required")]);
        let errors = rulebook::validate(&Value::from(json!({"rows": rows})), &rules).unwrap();
        prop_assert_eq!(errors.len(), expected);
    }

    #[test]
    fn integers_are_never_booleans_or_strings(flag in any::<bool>(), text in "[0-9]{1,5}") {
        let data = Value::from(json!({"flag": flag, "text": text}));
        let rules = RuleSet::from([("flag", "integer"), ("text", "integer")]);
        let errors = rulebook::validate(&data, &rules).unwrap();
        prop_assert_eq!(errors.len(), 2);
    }
}
