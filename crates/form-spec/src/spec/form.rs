use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FormField;

/// Colors and typography applied to the public form page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormTheme {
    pub primary_color: String,
    pub background_color: String,
    pub font_family: String,
}

/// Behavior switches attached to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSettings {
    #[serde(default)]
    pub allow_update: bool,
    #[serde(default)]
    pub allow_sub_items: bool,
    #[serde(default)]
    pub prefill_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<FormTheme>,
    pub success_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            allow_update: false,
            allow_sub_items: false,
            prefill_enabled: false,
            custom_theme: None,
            success_message: "Thank you! Your response has been submitted.".to_string(),
            redirect_url: None,
        }
    }
}

/// Top-level form definition.
///
/// Field order is significant: it is both render order and submission
/// order. At respondent-facing time the form is immutable; only the answer
/// state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Form {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub settings: FormSettings,
    #[serde(default)]
    pub submission_count: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

fn default_active() -> bool {
    true
}

impl Form {
    /// New empty form for a board, with default settings.
    pub fn new(title: impl Into<String>, board_id: impl Into<String>) -> Self {
        let board_id = board_id.into();
        Self {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            workspace_id: board_id.clone(),
            board_id,
            fields: Vec::new(),
            settings: FormSettings::default(),
            submission_count: 0,
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Field lookup by id.
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == field_id)
    }

    /// Moves the field with `field_id` to `to_index`, keeping the relative
    /// order of the others. Out-of-range targets clamp to the end.
    pub fn move_field(&mut self, field_id: &str, to_index: usize) -> bool {
        let Some(from) = self.fields.iter().position(|field| field.id == field_id) else {
            return false;
        };
        let field = self.fields.remove(from);
        let to = to_index.min(self.fields.len());
        self.fields.insert(to, field);
        true
    }

    /// Structural diagnostics for the authoring surface.
    ///
    /// Nothing reported here stops rendering: the evaluator fails open on
    /// dangling references and self-references are a design smell, not a
    /// structural error.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                problems.push(format!("duplicate field id '{}'", field.id));
            }
        }
        for field in &self.fields {
            let has_options = field
                .options
                .as_ref()
                .is_some_and(|options| !options.is_empty());
            if field.field_type.is_choice() && !has_options {
                problems.push(format!(
                    "field '{}' ({}) needs at least one option",
                    field.id,
                    field.field_type.label()
                ));
            }
            if !field.field_type.is_choice() && field.options.is_some() {
                problems.push(format!(
                    "field '{}' ({}) does not take options",
                    field.id,
                    field.field_type.label()
                ));
            }
            if let Some(logic) = &field.logic {
                for condition in &logic.conditions {
                    if condition.field_id == field.id {
                        problems.push(format!(
                            "visibility condition on '{}' references itself",
                            field.id
                        ));
                    } else if self.field(&condition.field_id).is_none() {
                        problems.push(format!(
                            "visibility condition on '{}' references unknown field '{}'",
                            field.id, condition.field_id
                        ));
                    }
                }
            }
        }
        problems
    }
}
