use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::logic::FieldLogic;

/// Closed set of input kinds a field can take.
///
/// The tag decides which input control renders and which format check runs
/// at submit time, so adding a kind is a compile-checked decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    LongText,
    Email,
    Phone,
    Number,
    Date,
    Dropdown,
    Checkbox,
    Rating,
    Status,
    Tags,
    People,
    Hour,
    Week,
    WorldClock,
    Formula,
    Mirror,
    ItemId,
    Dependency,
}

impl FieldType {
    /// Choice-like kinds that carry an options list.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Status | FieldType::Tags)
    }

    /// Wire label for the kind.
    pub fn label(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::LongText => "long_text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Rating => "rating",
            FieldType::Status => "status",
            FieldType::Tags => "tags",
            FieldType::People => "people",
            FieldType::Hour => "hour",
            FieldType::Week => "week",
            FieldType::WorldClock => "world_clock",
            FieldType::Formula => "formula",
            FieldType::Mirror => "mirror",
            FieldType::ItemId => "item_id",
            FieldType::Dependency => "dependency",
        }
    }
}

/// Linkage from a field to a column of the external work-item board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnLink {
    pub column_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

/// One question/input unit of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<FieldLogic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnLink>,
}

impl FormField {
    /// Minimal field of the given kind; choice kinds start with two options.
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        let options = field_type
            .is_choice()
            .then(|| vec!["Option 1".to_string(), "Option 2".to_string()]);
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            placeholder: None,
            options,
            logic: None,
            column: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<S: Into<String>>(mut self, options: Vec<S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_logic(mut self, logic: FieldLogic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn with_column(mut self, link: ColumnLink) -> Self {
        self.column = Some(link);
        self
    }
}
