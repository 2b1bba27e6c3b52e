use serde_json::{Map, Value, json};

use crate::spec::field::{FieldType, FormField};
use crate::spec::form::Form;
use crate::visibility::VisibilityMap;

/// JSON schema for the answer map of the form's currently-visible fields.
///
/// Hidden fields are left out entirely; only visible required fields land
/// in `required`. Everything is string-typed on the wire, so the schema
/// narrows by `enum`/`pattern` where the field kind allows it.
pub fn generate(form: &Form, visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in &form.fields {
        if !visibility.get(&field.id).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(field.id.clone(), field_schema(field));
        if field.required {
            required.push(Value::String(field.id.clone()));
        }
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": format!("{} answers", form.title),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(field: &FormField) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(field.label.clone()));
    match field.field_type {
        FieldType::Checkbox => {
            schema.insert("enum".into(), json!(["true", "false"]));
        }
        FieldType::Rating => {
            schema.insert("enum".into(), json!(["1", "2", "3", "4", "5"]));
        }
        FieldType::Email => {
            schema.insert("pattern".into(), Value::String(r"\S+@\S+\.\S+".into()));
        }
        FieldType::Dropdown | FieldType::Status => {
            if let Some(options) = &field.options {
                schema.insert("enum".into(), json!(options));
            }
        }
        _ => {}
    }
    Value::Object(schema)
}
