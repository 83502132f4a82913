//! Strict type rules. No coercion: `"1"` is not an integer and `true` is not
//! an integer either.

use std::sync::Arc;

use crate::messages;
use crate::rule::Rule;
use crate::rules::PredicateRule;
use crate::rules::predicates;

pub(crate) fn rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(PredicateRule::new("string", messages::STRING, predicates::valid_string)),
        Arc::new(PredicateRule::new("integer", messages::INTEGER, predicates::valid_integer)),
        Arc::new(PredicateRule::new("float", messages::FLOAT, predicates::valid_float)),
        Arc::new(PredicateRule::new("decimal", messages::DECIMAL, predicates::valid_decimal)),
        Arc::new(PredicateRule::new("boolean", messages::BOOLEAN, predicates::valid_boolean)),
        Arc::new(PredicateRule::new("list", messages::LIST, predicates::valid_list).stopping()),
        Arc::new(PredicateRule::new("dict", messages::DICT, predicates::valid_dict)),
    ]
}
