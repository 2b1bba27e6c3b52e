use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use form_spec::{
    AnswerMap, ColumnLink, FieldLogic, FieldType, Form, FormField, answers_schema,
    resolve_visibility,
};

/// Input shape describing a form to generate, from CLI prompts or a JSON
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    pub form: FormInput,
    #[serde(default)]
    pub fields: Vec<FieldInput>,
}

/// Metadata describing the form itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInput {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub board_id: String,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Field metadata collected from CLI interactions or JSON inputs. A blank
/// id gets minted as `field-N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInput {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub logic: Option<FieldLogic>,
    #[serde(default)]
    pub column: Option<ColumnLink>,
}

/// Generated artifacts returned by the builder.
#[derive(Debug)]
pub struct GeneratedBundle {
    pub form: Form,
    pub schema: Value,
    /// Non-fatal diagnostics (dangling or self-referencing conditions).
    pub warnings: Vec<String>,
}

/// Paths written by [`write_bundle`].
pub struct BundlePaths {
    pub form: PathBuf,
    pub schema: PathBuf,
}

/// Parses a field kind from its wire label (`text`, `long_text`, ...).
pub fn parse_field_type(raw: &str) -> Result<FieldType, String> {
    serde_json::from_value(Value::String(raw.trim().to_lowercase()))
        .map_err(|_| format!("unknown field type '{}'", raw.trim()))
}

/// Checks one field input against the ones gathered so far.
pub fn validate_field_input(field: &FieldInput, existing: &[FieldInput]) -> Result<(), String> {
    if !field.id.is_empty() && existing.iter().any(|other| other.id == field.id) {
        return Err(format!("field id '{}' already used", field.id));
    }
    if field.label.trim().is_empty() {
        return Err("field label cannot be empty".to_string());
    }
    if field.kind.is_choice() {
        let has_options = field
            .options
            .as_ref()
            .is_some_and(|options| !options.is_empty());
        if !has_options {
            return Err(format!(
                "{} fields require at least one option",
                field.kind.label()
            ));
        }
    } else if field.options.is_some() {
        return Err(format!("{} fields do not take options", field.kind.label()));
    }
    Ok(())
}

/// Builds the form and its answers schema from the gathered input.
pub fn build_bundle(input: &GenerationInput) -> Result<GeneratedBundle, String> {
    if input.form.id.trim().is_empty() {
        return Err("form id is required".to_string());
    }
    if input.form.title.trim().is_empty() {
        return Err("form title is required".to_string());
    }
    if input.fields.is_empty() {
        return Err("at least one field is required".to_string());
    }
    for (index, field) in input.fields.iter().enumerate() {
        validate_field_input(field, &input.fields[..index])
            .map_err(|err| format!("field {}: {}", index + 1, err))?;
    }

    let mut used: BTreeSet<String> = input
        .fields
        .iter()
        .filter(|field| !field.id.is_empty())
        .map(|field| field.id.clone())
        .collect();
    let mut next_id = 0usize;

    let mut form = Form::new(input.form.title.clone(), input.form.board_id.clone());
    form.id = input.form.id.trim().to_string();
    form.description = input.form.description.clone();
    if !input.form.workspace_id.is_empty() {
        form.workspace_id = input.form.workspace_id.clone();
    }
    if let Some(message) = &input.form.success_message {
        form.settings.success_message = message.clone();
    }
    form.settings.redirect_url = input.form.redirect_url.clone();

    form.fields = input
        .fields
        .iter()
        .map(|field| {
            let id = if field.id.is_empty() {
                mint_field_id(&mut used, &mut next_id)
            } else {
                field.id.clone()
            };
            FormField {
                id,
                field_type: field.kind,
                label: field.label.clone(),
                required: field.required,
                placeholder: field.placeholder.clone(),
                options: field.options.clone(),
                logic: field.logic.clone(),
                column: field.column.clone(),
            }
        })
        .collect();

    let warnings = form.check();
    let visibility = resolve_visibility(&form, &AnswerMap::new());
    let schema = answers_schema(&form, &visibility);

    Ok(GeneratedBundle {
        form,
        schema,
        warnings,
    })
}

fn mint_field_id(used: &mut BTreeSet<String>, next_id: &mut usize) -> String {
    loop {
        *next_id += 1;
        let candidate = format!("field-{}", next_id);
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
}

/// Writes `<id>.form.json` and `<id>.answers.schema.json` under `out_root`.
pub fn write_bundle(
    bundle: &GeneratedBundle,
    out_root: &Path,
    force: bool,
) -> Result<BundlePaths, String> {
    fs::create_dir_all(out_root)
        .map_err(|err| format!("cannot create {}: {}", out_root.display(), err))?;

    let form_path = out_root.join(format!("{}.form.json", bundle.form.id));
    let schema_path = out_root.join(format!("{}.answers.schema.json", bundle.form.id));
    if !force && (form_path.exists() || schema_path.exists()) {
        return Err(format!(
            "{} already exists; rerun with --force to overwrite",
            form_path.display()
        ));
    }

    write_pretty(&form_path, &serde_json::to_value(&bundle.form).map_err(stringify)?)?;
    write_pretty(&schema_path, &bundle.schema)?;

    Ok(BundlePaths {
        form: form_path,
        schema: schema_path,
    })
}

fn write_pretty(path: &Path, value: &Value) -> Result<(), String> {
    let mut contents = serde_json::to_string_pretty(value).map_err(stringify)?;
    contents.push('\n');
    fs::write(path, contents).map_err(|err| format!("cannot write {}: {}", path.display(), err))
}

fn stringify(err: impl std::fmt::Display) -> String {
    err.to_string()
}
