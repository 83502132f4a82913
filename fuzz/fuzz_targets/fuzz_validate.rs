#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rulebook::{RuleSet, Value};

#[derive(Debug, Arbitrary)]
struct Input {
    data: String,
    rules: Vec<(String, String)>,
}

// Configuration errors are expected; panics are not.
fuzz_target!(|input: Input| {
    let Ok(data) = serde_json::from_str::<serde_json::Value>(&input.data) else {
        return;
    };
    let rules: RuleSet = input.rules.into_iter().collect();
    let _ = rulebook::validate(&Value::from(data), &rules);
});
