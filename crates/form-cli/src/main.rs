pub mod builder;

mod wizard;

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use builder::{
    FieldInput, FormInput, GenerationInput, build_bundle, parse_field_type, validate_field_input,
    write_bundle,
};
use clap::{Parser, Subcommand, ValueEnum};
use form_spec::{
    AnswerMap, FieldLogic, FieldType, Form, FormSession, FormStore, LogicAction, LogicCondition,
    LogicOperator, MemoryStore, RenderField, RenderProgress, SessionStatus, StoreSink,
    SubmitAttempt, SubmitError, SubmitRequest, accept, build_render_payload, encode_checkbox,
    join_tags, render_json_ui, render_text, validate,
};
use wizard::{AnswerParseError, FillPresenter, PromptContext, Verbosity};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "SuperForm command line",
    long_about = "Fill, validate, render, and author board-linked forms with conditional field visibility."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a form interactively, the way a respondent would.
    Fill {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file with prefill answers (field id -> value).
        #[arg(long, value_name = "ANSWERS")]
        prefill: Option<PathBuf>,
        /// Update an existing external item instead of creating one.
        #[arg(long, value_name = "ITEM_ID")]
        item_id: Option<String>,
        /// Show verbose output (status line, visible fields, parse hints).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also print the final answers as JSON.
        #[arg(long)]
        answers_json: bool,
    },
    /// Validate an answers file against a form definition.
    Validate {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the render payload for a form and optional answers.
    Render {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Check a form definition for structural problems.
    Check {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Interactively author a new form definition.
    New {
        /// Directory for the generated files (defaults to
        /// SUPERFORM_OUTPUT_DIR or the current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite existing files if present.
        #[arg(long)]
        force: bool,
    },
    /// Build the form artifacts from a JSON description.
    Generate {
        /// JSON file describing the form metadata and fields.
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Accept an answers file as a submission and print the stored record.
    Submit {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Mark the submission as updating this external item.
        #[arg(long, value_name = "ITEM_ID")]
        item_id: Option<String>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fill {
            form,
            prefill,
            item_id,
            verbose,
            answers_json,
        } => run_fill(form, prefill, item_id, verbose, answers_json),
        Command::Validate { form, answers } => run_validate(form, answers),
        Command::Render {
            form,
            answers,
            format,
        } => run_render(form, answers, format),
        Command::Check { form } => run_check(form),
        Command::New { out, force } => run_new(out, force),
        Command::Generate { input, out, force } => run_generate(input, out, force),
        Command::Submit {
            form,
            answers,
            item_id,
        } => run_submit(form, answers, item_id),
    }
}

fn load_form(path: &Path) -> CliResult<Form> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn load_answers(path: &Path) -> CliResult<AnswerMap> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn run_fill(
    form_path: PathBuf,
    prefill: Option<PathBuf>,
    item_id: Option<String>,
    verbose: bool,
    answers_json: bool,
) -> CliResult<()> {
    let form = load_form(&form_path)?;
    for problem in form.check() {
        eprintln!("Warning: {}", problem);
    }

    let store = MemoryStore::new();
    let stored = store.create_form(form)?;
    let mut session = FormSession::new(stored);
    if let Some(path) = prefill {
        let seed = load_answers(&path)?;
        session.prefill(seed.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    if let Some(item_id) = item_id {
        session.link_external_item(item_id);
    }

    let mut presenter = FillPresenter::new(Verbosity::from_verbose(verbose));

    loop {
        let payload = build_render_payload(session.form(), session.answers());
        presenter.show_header(&payload);
        presenter.show_status(&payload);
        let Some(next_id) = payload.next_field_id.clone() else {
            break;
        };
        let Some(field) = payload.fields.iter().find(|field| field.id == next_id) else {
            return Err(format!("render payload missing field '{}'", next_id).into());
        };
        let answer = prompt_field(field, &payload.progress, &presenter)?;
        session.set_answer(&next_id, answer);
    }

    loop {
        let mut sink = StoreSink::new(&store);
        match session.submit(&mut sink) {
            SubmitAttempt::Submitted => {
                presenter.show_completion(session.status());
                break;
            }
            SubmitAttempt::Invalid => {
                presenter.show_validation(session.errors());
                let offending: Vec<String> = session.errors().keys().cloned().collect();
                let payload = build_render_payload(session.form(), session.answers());
                for field_id in offending {
                    if let Some(field) = payload.fields.iter().find(|field| field.id == field_id) {
                        let answer = prompt_field(field, &payload.progress, &presenter)?;
                        session.set_answer(&field_id, answer);
                    }
                }
            }
            SubmitAttempt::Failed => {
                if let Some(banner) = session.banner() {
                    presenter.show_banner(banner);
                }
                return Err("submission failed".into());
            }
            SubmitAttempt::Rejected => {
                if let SessionStatus::Closed { message } = session.status() {
                    presenter.show_banner(message);
                }
                return Err("form is closed".into());
            }
            SubmitAttempt::Blocked => {
                return Err("a submission is already outstanding".into());
            }
        }
    }

    if answers_json {
        println!("{}", serde_json::to_string_pretty(session.answers())?);
    }
    Ok(())
}

fn prompt_field(
    field: &RenderField,
    progress: &RenderProgress,
    presenter: &FillPresenter,
) -> CliResult<String> {
    let prompt = PromptContext::new(field, progress);
    loop {
        presenter.show_prompt(&prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }

        match parse_answer(field, trimmed) {
            Ok(value) => return Ok(value),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn parse_answer(field: &RenderField, raw: &str) -> Result<String, AnswerParseError> {
    let value = raw.trim();
    if value.is_empty() {
        if field.required {
            return Err(AnswerParseError::new("This field requires an answer.", None));
        }
        return Ok(String::new());
    }
    match field.field_type {
        FieldType::Checkbox => parse_checkbox(value),
        FieldType::Rating => parse_rating(value),
        FieldType::Number => parse_number(value),
        FieldType::Dropdown | FieldType::Status => parse_choice(field, value),
        FieldType::Tags => parse_tags(field, value),
        _ => Ok(value.to_string()),
    }
}

fn parse_checkbox(raw: &str) -> Result<String, AnswerParseError> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(encode_checkbox(true).to_string()),
        "false" | "f" | "no" | "n" | "0" => Ok(encode_checkbox(false).to_string()),
        _ => Err(AnswerParseError::new(
            "Please answer yes or no.",
            Some("expected boolean (y/n/true/false)".to_string()),
        )),
    }
}

fn parse_rating(raw: &str) -> Result<String, AnswerParseError> {
    match raw.parse::<u8>() {
        Ok(stars @ 1..=5) => Ok(stars.to_string()),
        _ => Err(AnswerParseError::new(
            "Please rate from 1 to 5.",
            Some("expected integer between 1 and 5".to_string()),
        )),
    }
}

fn parse_number(raw: &str) -> Result<String, AnswerParseError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(raw.to_string()),
        _ => Err(AnswerParseError::new(
            "Please enter a number.",
            Some("expected finite number".to_string()),
        )),
    }
}

fn parse_choice(field: &RenderField, raw: &str) -> Result<String, AnswerParseError> {
    let options = field.options.as_deref().unwrap_or_default();
    match options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
    {
        Some(option) => Ok(option.clone()),
        None => Err(AnswerParseError::new(
            format!("Choose one of: {}.", options.join(", ")),
            Some(format!("allowed values: {}", options.join(", "))),
        )),
    }
}

fn parse_tags(field: &RenderField, raw: &str) -> Result<String, AnswerParseError> {
    let options = field.options.as_deref().unwrap_or_default();
    let mut selected: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        let Some(option) = options.iter().find(|option| option.eq_ignore_ascii_case(tag)) else {
            return Err(AnswerParseError::new(
                format!("Unknown tag '{}'. Choose from: {}.", tag, options.join(", ")),
                Some(format!("allowed tags: {}", options.join(", "))),
            ));
        };
        if !selected.contains(option) {
            selected.push(option.clone());
        }
    }
    if selected.is_empty() {
        return Err(AnswerParseError::new(
            format!("Select at least one tag from: {}.", options.join(", ")),
            None,
        ));
    }
    Ok(join_tags(&selected))
}

fn run_validate(form_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let answers = load_answers(&answers_path)?;
    let errors = validate(&form, &answers);
    if errors.is_empty() {
        println!("Validation result: valid");
        Ok(())
    } else {
        println!("Validation result: invalid");
        for (field_id, message) in &errors {
            println!("  {}: {}", field_id, message);
        }
        Err("validation failed".into())
    }
}

fn run_render(
    form_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let answers = match answers_path {
        Some(path) => load_answers(&path)?,
        None => AnswerMap::new(),
    };
    let payload = build_render_payload(&form, &answers);
    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?),
    }
    Ok(())
}

fn run_check(form_path: PathBuf) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let problems = form.check();
    if problems.is_empty() {
        println!("No problems found.");
        Ok(())
    } else {
        for problem in &problems {
            println!("{}", problem);
        }
        Err(format!("{} problem(s) found", problems.len()).into())
    }
}

fn run_submit(
    form_path: PathBuf,
    answers_path: PathBuf,
    item_id: Option<String>,
) -> CliResult<()> {
    let store = MemoryStore::new();
    let stored = store.create_form(load_form(&form_path)?)?;
    let request = SubmitRequest {
        form_id: stored.id.clone(),
        answers: load_answers(&answers_path)?,
        external_item_id: item_id,
    };
    match accept(&store, None, request) {
        Ok(outcome) => {
            println!("{}", outcome.message);
            println!("{}", serde_json::to_string_pretty(&outcome.submission)?);
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("Validation errors:");
            for (field_id, message) in &errors {
                eprintln!("  {}: {}", field_id, message);
            }
            Err("submission failed validation".into())
        }
        Err(err) => Err(Box::new(err)),
    }
}

fn run_generate(input_path: PathBuf, out: Option<PathBuf>, force: bool) -> CliResult<()> {
    let contents = fs::read_to_string(&input_path)?;
    let input: GenerationInput = serde_json::from_str(&contents)?;
    finish_bundle(&input, out, force)
}

fn run_new(out: Option<PathBuf>, force: bool) -> CliResult<()> {
    println!("Interactive form builder");
    let id = prompt_non_empty("Form id (used for file names)", None)?;
    let title = prompt_non_empty("Form title", None)?;
    let description = prompt_optional("Description (optional)")?.unwrap_or_default();
    let board_id = prompt_optional("Board id (optional)")?.unwrap_or_default();

    let mut fields: Vec<FieldInput> = Vec::new();
    loop {
        let field_id = prompt_optional("Field id (blank to finish)")?;
        let Some(field_id) = field_id.filter(|value| !value.trim().is_empty()) else {
            break;
        };

        let label = prompt_non_empty("Field label", Some(&field_id))?;
        let kind = prompt_kind()?;
        let required = prompt_bool("Required?", false)?;
        let placeholder = prompt_optional("Placeholder (optional)")?;
        let options = if kind.is_choice() {
            Some(prompt_options()?)
        } else {
            None
        };
        let logic = prompt_field_logic(&fields)?;

        let field = FieldInput {
            id: field_id,
            kind,
            label,
            required,
            placeholder,
            options,
            logic,
            column: None,
        };
        if let Err(err) = validate_field_input(&field, &fields) {
            println!("Invalid field: {}. Let's try again.", err);
            continue;
        }
        fields.push(field);
    }

    if fields.is_empty() {
        return Err("at least one field is required".into());
    }

    let success_message = prompt_line(
        "Success message",
        Some("Thank you! Your response has been submitted."),
    )?;
    let redirect_url = prompt_optional("Redirect URL (optional)")?;

    let input = GenerationInput {
        form: FormInput {
            id,
            title,
            description,
            workspace_id: board_id.clone(),
            board_id,
            success_message: Some(success_message),
            redirect_url,
        },
        fields,
    };
    finish_bundle(&input, out, force)
}

fn finish_bundle(input: &GenerationInput, out: Option<PathBuf>, force: bool) -> CliResult<()> {
    let out_root = resolve_output_root(out)?;
    let bundle = build_bundle(input)?;
    let paths = write_bundle(&bundle, &out_root, force)?;
    println!("Wrote {}", paths.form.display());
    println!("Wrote {}", paths.schema.display());
    for warning in &bundle.warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os("SUPERFORM_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

fn prompt_field_logic(existing: &[FieldInput]) -> CliResult<Option<FieldLogic>> {
    if existing.is_empty() || !prompt_bool("Add visibility logic?", false)? {
        return Ok(None);
    }
    println!("Existing fields: {}", existing_field_ids(existing));
    let action = loop {
        let raw = prompt_line("Action (show/hide)", Some("show"))?;
        match raw.trim().to_lowercase().as_str() {
            "show" => break LogicAction::Show,
            "hide" => break LogicAction::Hide,
            other => println!("Unknown action '{}'. Expected show or hide.", other),
        }
    };
    let mut conditions = Vec::new();
    loop {
        let field_id = prompt_optional("Condition field id (blank to finish)")?;
        let Some(field_id) = field_id.filter(|value| !value.trim().is_empty()) else {
            break;
        };
        if !existing.iter().any(|field| field.id == field_id) {
            println!(
                "Note: '{}' is not an existing field id; the condition will read an empty value.",
                field_id
            );
        }
        let operator = prompt_operator()?;
        let value = if matches!(operator, LogicOperator::IsEmpty | LogicOperator::IsNotEmpty) {
            String::new()
        } else {
            prompt_line("Comparison value", None)?
        };
        conditions.push(LogicCondition {
            field_id,
            operator,
            value,
        });
    }
    if conditions.is_empty() {
        Ok(None)
    } else {
        Ok(Some(FieldLogic { conditions, action }))
    }
}

fn prompt_operator() -> CliResult<LogicOperator> {
    loop {
        let raw = prompt_line(
            "Operator (equals/not_equals/contains/is_empty/is_not_empty)",
            Some("equals"),
        )?;
        match raw.trim().to_lowercase().as_str() {
            "equals" => return Ok(LogicOperator::Equals),
            "not_equals" => return Ok(LogicOperator::NotEquals),
            "contains" => return Ok(LogicOperator::Contains),
            "is_empty" => return Ok(LogicOperator::IsEmpty),
            "is_not_empty" => return Ok(LogicOperator::IsNotEmpty),
            other => println!("Unknown operator '{}'.", other),
        }
    }
}

fn prompt_kind() -> CliResult<FieldType> {
    loop {
        let raw = prompt_line(
            "Field type (text|long_text|email|phone|number|date|dropdown|checkbox|rating|status|tags|people|hour|week|world_clock)",
            Some("text"),
        )?;
        match parse_field_type(&raw) {
            Ok(kind) => return Ok(kind),
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt_options() -> CliResult<Vec<String>> {
    loop {
        let raw = prompt_line("Comma separated options (e.g. Yes,No,Maybe)", None)?;
        let options = raw
            .split(',')
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if options.is_empty() {
            println!("Provide at least one option for choice fields.");
            continue;
        }
        return Ok(options);
    }
}

fn existing_field_ids(fields: &[FieldInput]) -> String {
    if fields.is_empty() {
        "<none>".to_string()
    } else {
        fields
            .iter()
            .map(|field| field.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn prompt_line(prompt: &str, default: Option<&str>) -> CliResult<String> {
    if let Some(default_value) = default {
        print!("{} [{}]: ", prompt, default_value);
    } else {
        print!("{}: ", prompt);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        if let Some(default_value) = default {
            Ok(default_value.to_string())
        } else {
            Ok(String::new())
        }
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_optional(prompt: &str) -> CliResult<Option<String>> {
    let value = prompt_line(prompt, None)?;
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn prompt_non_empty(prompt: &str, default: Option<&str>) -> CliResult<String> {
    loop {
        let value = prompt_line(prompt, default)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        println!("Value cannot be empty.");
    }
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let prompt_text = format!("{} (y/n)", prompt.trim());
    let default_hint = if default { "Y" } else { "N" };
    loop {
        let line = prompt_line(&prompt_text, Some(default_hint))?;
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                println!("Invalid answer '{}'. Expected yes or no.", other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use serde_json::from_str;
    use tempfile::TempDir;

    fn render_field(field_type: FieldType, required: bool, options: Option<Vec<&str>>) -> RenderField {
        RenderField {
            id: "f".to_string(),
            label: "Field".to_string(),
            field_type,
            required,
            placeholder: None,
            options: options.map(|options| options.into_iter().map(str::to_string).collect()),
            visible: true,
            answered: false,
            value: String::new(),
        }
    }

    #[test]
    fn parse_answer_checkbox_accepts_yes() {
        let field = render_field(FieldType::Checkbox, true, None);
        assert_eq!(parse_answer(&field, "yes").unwrap(), "true");
        assert_eq!(parse_answer(&field, "NO").unwrap(), "false");
        assert!(parse_answer(&field, "maybe").is_err());
    }

    #[test]
    fn parse_answer_rating_checks_bounds() {
        let field = render_field(FieldType::Rating, true, None);
        assert_eq!(parse_answer(&field, "3").unwrap(), "3");
        assert!(parse_answer(&field, "0").is_err());
        assert!(parse_answer(&field, "6").is_err());
        assert!(parse_answer(&field, "many").is_err());
    }

    #[test]
    fn parse_answer_number_requires_finite() {
        let field = render_field(FieldType::Number, true, None);
        assert_eq!(parse_answer(&field, "3.5").unwrap(), "3.5");
        assert!(parse_answer(&field, "NaN").is_err());
        assert!(parse_answer(&field, "twelve").is_err());
    }

    #[test]
    fn parse_answer_choice_canonicalizes_case() {
        let field = render_field(FieldType::Dropdown, true, Some(vec!["Alpha", "Beta"]));
        assert_eq!(parse_answer(&field, "alpha").unwrap(), "Alpha");
        assert!(parse_answer(&field, "gamma").is_err());
    }

    #[test]
    fn parse_answer_tags_joins_canonical_selection() {
        let field = render_field(FieldType::Tags, true, Some(vec!["Red", "Green", "Blue"]));
        assert_eq!(parse_answer(&field, "blue, red").unwrap(), "Blue,Red");
        assert!(parse_answer(&field, "red, purple").is_err());
    }

    #[test]
    fn parse_answer_optional_blank_is_empty_string() {
        let field = render_field(FieldType::Text, false, None);
        assert_eq!(parse_answer(&field, "").unwrap(), "");
    }

    #[test]
    fn parse_answer_required_blank_is_rejected() {
        let field = render_field(FieldType::Text, true, None);
        assert!(parse_answer(&field, "  ").is_err());
    }

    const FIXTURE: &str = include_str!("../fixtures/sample_generation.json");

    #[test]
    fn fixture_generates_bundle() {
        let input: GenerationInput = from_str(FIXTURE).expect("fixture deserializes");
        let bundle = build_bundle(&input).expect("bundle builds");
        assert!(bundle.warnings.is_empty(), "{:?}", bundle.warnings);

        let ids: Vec<_> = bundle
            .form
            .fields
            .iter()
            .map(|field| field.id.as_str())
            .collect();
        assert_eq!(ids, vec!["field-1", "field-2", "field-3"]);

        let temp_dir = TempDir::new().expect("temp dir");
        let paths = write_bundle(&bundle, temp_dir.path(), false).expect("bundle writes");
        assert!(paths.form.exists());
        assert!(paths.schema.exists());

        let spec_contents = fs::read_to_string(&paths.form).expect("read form file");
        let spec_value: Value = serde_json::from_str(&spec_contents).expect("form file JSON");
        assert_eq!(spec_value["id"].as_str(), Some("smoke-form"));

        // Second write without --force refuses to clobber.
        assert!(write_bundle(&bundle, temp_dir.path(), false).is_err());
        assert!(write_bundle(&bundle, temp_dir.path(), true).is_ok());
    }

    #[test]
    fn build_bundle_requires_fields() {
        let input: GenerationInput =
            from_str(r#"{ "form": { "id": "x", "title": "X" } }"#).expect("deserialize");
        assert!(build_bundle(&input).is_err());
    }

    #[test]
    fn build_bundle_rejects_choice_without_options() {
        let input: GenerationInput = from_str(
            r#"{
                "form": { "id": "x", "title": "X" },
                "fields": [ { "type": "dropdown", "label": "Pick" } ]
            }"#,
        )
        .expect("deserialize");
        let err = build_bundle(&input).expect_err("should fail");
        assert!(err.contains("option"));
    }

    #[test]
    fn parse_field_type_accepts_wire_labels() {
        assert_eq!(parse_field_type("long_text").unwrap(), FieldType::LongText);
        assert_eq!(parse_field_type(" WORLD_CLOCK ").unwrap(), FieldType::WorldClock);
        assert!(parse_field_type("spreadsheet").is_err());
    }
}
