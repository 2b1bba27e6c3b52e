use serde_json::{Map, Value, json};

use crate::answers::AnswerMap;
use crate::schema;
use crate::spec::field::FieldType;
use crate::spec::form::Form;
use crate::visibility::resolve_visibility;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Some visible field has no answer yet.
    NeedInput,
    /// Every visible field carries an answer.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single field for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub visible: bool,
    /// Whether the snapshot holds a value for this field at all.
    pub answered: bool,
    pub value: String,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub form_description: Option<String>,
    pub status: RenderStatus,
    pub next_field_id: Option<String>,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
    pub schema: Value,
}

/// Builds the renderer payload from the form and the current answers.
pub fn build_render_payload(form: &Form, answers: &AnswerMap) -> RenderPayload {
    let visibility = resolve_visibility(form, answers);

    let fields = form
        .fields
        .iter()
        .map(|field| RenderField {
            id: field.id.clone(),
            label: field.label.clone(),
            field_type: field.field_type,
            required: field.required,
            placeholder: field.placeholder.clone(),
            options: field.options.clone(),
            visible: visibility.get(&field.id).copied().unwrap_or(true),
            answered: answers.contains(&field.id),
            value: answers.value_of(&field.id).to_string(),
        })
        .collect::<Vec<_>>();

    let total = fields.iter().filter(|field| field.visible).count();
    let answered = fields
        .iter()
        .filter(|field| field.visible && field.answered)
        .count();
    let next_field_id = fields
        .iter()
        .find(|field| field.visible && !field.answered)
        .map(|field| field.id.clone());

    let status = if next_field_id.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    let form_description = if form.description.is_empty() {
        None
    } else {
        Some(form.description.clone())
    };

    RenderPayload {
        form_id: form.id.clone(),
        form_title: form.title.clone(),
        form_description,
        status,
        next_field_id,
        progress: RenderProgress { answered, total },
        fields,
        schema: schema::generate(form, &visibility),
    }
}

/// Renders the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert(
                "type".into(),
                Value::String(field.field_type.label().to_string()),
            );
            map.insert("required".into(), Value::Bool(field.required));
            if let Some(placeholder) = &field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if let Some(options) = &field.options {
                map.insert(
                    "options".into(),
                    Value::Array(
                        options
                            .iter()
                            .map(|option| Value::String(option.clone()))
                            .collect(),
                    ),
                );
            }
            map.insert("visible".into(), Value::Bool(field.visible));
            if field.answered {
                map.insert("value".into(), Value::String(field.value.clone()));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "form_description": payload.form_description,
        "status": payload.status.as_str(),
        "next_field_id": payload.next_field_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "fields": fields,
        "schema": payload.schema,
    })
}

/// Renders the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", payload.form_title, payload.form_id));
    if let Some(description) = &payload.form_description {
        lines.push(format!("About: {}", description));
    }
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    if let Some(next_field) = &payload.next_field_id {
        lines.push(format!("Next field: {}", next_field));
        if let Some(field) = payload.fields.iter().find(|field| &field.id == next_field) {
            lines.push(format!("  Label: {}", field.label));
            if field.required {
                lines.push("  Required: yes".to_string());
            }
            if let Some(placeholder) = &field.placeholder {
                lines.push(format!("  Placeholder: {}", placeholder));
            }
            if let Some(options) = &field.options {
                lines.push(format!("  Options: {}", options.join(", ")));
            }
        }
    } else {
        lines.push("All visible fields are answered.".to_string());
    }

    lines.push("Visible fields:".to_string());
    for field in payload.fields.iter().filter(|field| field.visible) {
        let mut entry = format!(" - {} ({})", field.id, field.label);
        if field.required {
            entry.push_str(" [required]");
        }
        if field.answered {
            entry.push_str(&format!(" = {}", field.value));
        }
        lines.push(entry);
    }

    lines.join("\n")
}
