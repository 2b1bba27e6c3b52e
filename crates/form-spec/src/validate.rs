use std::collections::BTreeMap;

use regex::Regex;

use crate::answers::AnswerMap;
use crate::spec::field::FieldType;
use crate::spec::form::Form;
use crate::visibility::is_visible;

/// Validation failures keyed by field id. Empty means submission may proceed.
pub type ErrorMap = BTreeMap<String, String>;

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

/// Checks every visible field of the form against the answers.
///
/// Hidden fields are skipped outright: a required field concealed by its
/// rule produces no error. The email format check runs after the required
/// check and overwrites its message when both would apply.
pub fn validate(form: &Form, answers: &AnswerMap) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in &form.fields {
        if !is_visible(field, answers) {
            continue;
        }
        let value = answers.value_of(&field.id);
        if field.required && value.is_empty() {
            errors.insert(field.id.clone(), format!("{} is required", field.label));
        }
        if field.field_type == FieldType::Email && !value.is_empty() && !matches_email(value) {
            errors.insert(
                field.id.clone(),
                "Please enter a valid email address".to_string(),
            );
        }
    }
    errors
}

fn matches_email(value: &str) -> bool {
    if let Ok(regex) = Regex::new(EMAIL_PATTERN) {
        regex.is_match(value)
    } else {
        true
    }
}
