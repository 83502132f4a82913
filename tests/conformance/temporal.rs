use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use rulebook::{RuleSet, Validator, ValidatorError, Value};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .unwrap()
}

fn record<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<IndexMap<_, _>>(),
    )
}

#[test]
fn native_values_pass_date_time() {
    let data = record([
        ("a", Value::from(at(2020, 1, 1, 12))),
        ("b", Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
        ("c", Value::from(5)),
    ]);
    let rules = RuleSet::from([("a", "date_time"), ("b", "date_time:%d/%m/%Y"), ("c", "date_time")]);
    let errors = Validator::new().validate(&data, &rules).unwrap();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors["c"],
        vec!["The c field has to be a valid date/time in the format %Y-%m-%d %H:%M:%S."]
    );
}

#[test]
fn native_fields_compare_with_each_other() {
    let data = record([
        ("start", Value::from(at(2020, 1, 1, 9))),
        ("end", Value::from(at(2020, 1, 1, 17))),
    ]);
    let ok = RuleSet::from([("end", "after:start"), ("start", "before_or_equal:end")]);
    assert!(Validator::new().validate(&data, &ok).unwrap().is_empty());

    let bad = RuleSet::from([("end", "before:start")]);
    assert_eq!(
        Validator::new().validate(&data, &bad).unwrap()["end"],
        vec!["The end field has to be before start."]
    );
}

#[test]
fn native_values_compare_with_literals() {
    let data = record([("due", Value::from(at(2020, 6, 1, 0)))]);
    let rules = RuleSet::from([("due", "after:2020-05-31 23:59:59|before:2020-06-01 00:00:01")]);
    assert!(Validator::new().validate(&data, &rules).unwrap().is_empty());
}

#[test]
fn dates_compare_with_date_times_by_day() {
    let data = record([
        ("day", Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
        ("moment", Value::from(at(2020, 1, 1, 18))),
    ]);
    let rules = RuleSet::from([
        ("day", "after_or_equal:moment|before_or_equal:moment"),
        ("moment", "after:2019-12-31 23:00:00"),
    ]);
    assert!(Validator::new().validate(&data, &rules).unwrap().is_empty());

    let strict = RuleSet::from([("day", "before:moment")]);
    assert_eq!(
        Validator::new().validate(&data, &strict).unwrap()["day"],
        vec!["The day field has to be before moment."]
    );
}

#[test]
fn string_field_against_native_reference() {
    let data = record([
        ("opens", Value::from("01.03.2021")),
        ("closes", Value::from(at(2021, 3, 2, 0))),
    ]);
    let rules = RuleSet::from([("opens", "date_time:%d.%m.%Y|before:closes")]);
    assert!(Validator::new().validate(&data, &rules).unwrap().is_empty());
}

#[test]
fn unparseable_own_value_is_a_configuration_error() {
    let data = record([("at", Value::from("soon"))]);
    let rules = RuleSet::from([("at", "before:2020-01-01 00:00:00")]);
    let err = Validator::new().validate(&data, &rules).unwrap_err();
    assert_eq!(err, ValidatorError::InvalidDateTimeFormat);
}

#[test]
fn missing_reference_parameter_is_a_configuration_error() {
    let data = record([("at", Value::from(at(2020, 1, 1, 0)))]);
    let rules = RuleSet::from([("at", "after")]);
    let err = Validator::new().validate(&data, &rules).unwrap_err();
    assert_eq!(err, ValidatorError::InvalidDateTimeFormat);
}
