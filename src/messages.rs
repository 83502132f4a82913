//! Default message templates of the built-in rules.
//!
//! Placeholders are filled from the failing rule's message fields. Every
//! template names `{field}`; the others are listed next to each rule.

pub const ACCEPTED: &str = "The {field} field must be accepted.";
pub const AFTER: &str = "The {field} field has to be after {other}.";
pub const AFTER_OR_EQUAL: &str = "The {field} field has to be after or equal to {other}.";
pub const ALPHA_NUM: &str = "The {field} field can only contain letters and numbers.";
pub const ALPHA_NUM_SPACE: &str =
    "The {field} field can only contain letters, numbers and spaces.";
pub const BEFORE: &str = "The {field} field has to be before {other}.";
pub const BEFORE_OR_EQUAL: &str = "The {field} field has to be before or equal to {other}.";
pub const BOOLEAN: &str = "The {field} field must be a boolean.";
/// `{format}`
pub const DATE_TIME: &str = "The {field} field has to be a valid date/time in the format {format}.";
pub const DECIMAL: &str = "The {field} field must be a decimal.";
pub const DICT: &str = "The {field} field must be a dict.";
pub const EMAIL: &str = "The {field} field has to be a valid email address.";
/// `{values}`
pub const ENDS_WITH: &str = "The {field} field must end with one of the following values: {values}.";
pub const FILLED: &str = "The {field} field must not be empty when it is present.";
pub const FLOAT: &str = "The {field} field must be a float.";
/// `{values}`
pub const IN: &str = "The {field} field must be one of the following values: {values}.";
pub const INTEGER: &str = "The {field} field must be an integer.";
pub const IP: &str = "The {field} field has to be a valid IP address.";
pub const JSON: &str = "The {field} field must be a valid JSON string.";
pub const LIST: &str = "The {field} field must be a list.";
/// `{max}`
pub const MAX: &str = "The {field} field has to have a maximum value of {max}.";
pub const MAX_ITEMS: &str = "The {field} field cannot contain more than {max} items.";
pub const MAX_STRING: &str = "The {field} field cannot be longer than {max} characters.";
/// `{min}`
pub const MIN: &str = "The {field} field has to have a minimum value of {min}.";
pub const MIN_ITEMS: &str = "The {field} field has to contain at least {min} items.";
pub const MIN_STRING: &str = "The {field} field has to be at least {min} characters.";
/// `{other}`
pub const NOT_WITH: &str = "The {field} field can't be present when the {other} field is present.";
pub const PROHIBITED: &str = "The {field} field is prohibited.";
/// `{other}`, `{value}`
pub const PROHIBITED_IF: &str = "The {field} field is prohibited if the {other} field equals {value}.";
/// `{other}`, `{value}`
pub const PROHIBITED_UNLESS: &str =
    "The {field} field is prohibited unless the {other} field equals {value}.";
/// `{other}`
pub const PROHIBITED_WITH: &str =
    "The {field} field is prohibited if any of the following fields are present: {other}.";
/// `{regex}`
pub const REGEX: &str = "The {field} field has to match the following regex: {regex}.";
pub const REQUIRED: &str = "The {field} field is required.";
/// `{other}`, `{value}`
pub const REQUIRED_IF: &str = "The {field} field is required if the {other} field equals {value}.";
/// `{other}`, `{value}`
pub const REQUIRED_UNLESS: &str =
    "The {field} field is required unless the {other} field equals {value}.";
/// `{other}`
pub const REQUIRED_WITH: &str =
    "The {field} field is required if any of the following fields are present: {other}.";
/// `{other}`
pub const REQUIRED_WITHOUT: &str =
    "The {field} field is required if any of the following fields are absent: {other}.";
/// `{size}`
pub const SIZE: &str = "The {field} field has to have a size of {size}.";
/// `{values}`
pub const STARTS_WITH: &str =
    "The {field} field must start with one of the following values: {values}.";
pub const STRING: &str = "The {field} field must be a string.";
pub const UPPERCASE: &str = "The {field} field must be uppercase.";
pub const URL: &str = "The {field} field has to be a valid URL.";
pub const UUID4: &str = "The {field} field must be a valid UUID.";
