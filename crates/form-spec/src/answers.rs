use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Live answer state for one respondent, keyed by field id.
///
/// Every value is a plain string: checkboxes store the literal `"true"` or
/// `"false"`, tags store the selection comma-joined. An absent key reads as
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a field; absent keys read as `""`.
    pub fn value_of(&self, field_id: &str) -> &str {
        self.0.get(field_id).map(String::as_str).unwrap_or("")
    }

    /// Replaces the stored value for a field.
    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field_id.into(), value.into());
    }

    pub fn remove(&mut self, field_id: &str) -> Option<String> {
        self.0.remove(field_id)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Encodes a checkbox state the way the renderer stores it.
pub fn encode_checkbox(checked: bool) -> &'static str {
    if checked { "true" } else { "false" }
}

/// Splits a stored tags value into the selected options.
pub fn split_tags(value: &str) -> Vec<&str> {
    value.split(',').filter(|tag| !tag.is_empty()).collect()
}

/// Joins selected tags into the stored comma form.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
