use form_spec::{
    ErrorMap, FieldType, RenderField, RenderPayload, RenderProgress, RenderStatus, SessionStatus,
};

/// Controls which bits of state the fill loop prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: field prompts only.
    Clean,
    /// Verbose output: status line, visible fields, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and progress once the engine yields the next field.
pub struct FillPresenter {
    verbosity: Verbosity,
    header_printed: bool,
}

impl FillPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, payload: &RenderPayload) {
        if self.header_printed {
            return;
        }
        println!("Form: {}", payload.form_title);
        if let Some(description) = &payload.form_description {
            println!("{}", description);
        }
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &RenderPayload) {
        if self.verbosity.is_verbose() {
            println!(
                "Status: {} ({}/{})",
                payload.status.as_str(),
                payload.progress.answered,
                payload.progress.total
            );
            self.print_visible_fields(payload);
        } else if payload.status == RenderStatus::NeedInput
            && payload.fields.iter().all(|field| !field.visible)
        {
            println!("No visible fields are available; check your conditional logic.");
        }
    }

    fn print_visible_fields(&self, payload: &RenderPayload) {
        println!("Visible fields:");
        for field in payload.fields.iter().filter(|field| field.visible) {
            let mut entry = format!(" - {} ({})", field.id, field.label);
            if field.required {
                entry.push_str(" [required]");
            }
            println!("{}", entry);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.total > 0 {
            format!("{}/{} {}", prompt.index, prompt.total, prompt.label)
        } else {
            format!("{} {}", prompt.index, prompt.label)
        };
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(placeholder) = &prompt.placeholder {
            println!("e.g. {}", placeholder);
        }
        if self.verbosity.is_verbose() && !prompt.options.is_empty() {
            println!("Options: {}", prompt.options.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_validation(&self, errors: &ErrorMap) {
        eprintln!("Validation errors:");
        for (field_id, message) in errors {
            eprintln!("  {}: {}", field_id, message);
        }
    }

    pub fn show_banner(&self, banner: &str) {
        eprintln!("{}", banner);
    }

    pub fn show_completion(&self, status: &SessionStatus) {
        if let SessionStatus::Submitted {
            message,
            redirect_url,
        } = status
        {
            println!("Done ✅");
            println!("{}", message);
            if let Some(url) = redirect_url {
                println!("Continue at: {}", url);
            }
        }
    }
}

/// Context used to format a single field prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
}

impl PromptContext {
    pub fn new(field: &RenderField, progress: &RenderProgress) -> Self {
        Self {
            index: (progress.answered + 1).max(1),
            total: progress.total,
            label: field.label.clone(),
            required: field.required,
            hint: type_hint(field),
            placeholder: field.placeholder.clone(),
            options: field.options.clone().unwrap_or_default(),
        }
    }
}

fn type_hint(field: &RenderField) -> Option<String> {
    match field.field_type {
        FieldType::Checkbox => Some("(yes/no)".to_string()),
        FieldType::Rating => Some("(1-5)".to_string()),
        FieldType::Number => Some("(number)".to_string()),
        FieldType::Date => Some("(YYYY-MM-DD)".to_string()),
        FieldType::Hour => Some("(HH:MM)".to_string()),
        FieldType::Week => Some("(YYYY-Www)".to_string()),
        FieldType::Email => Some("(name@example.com)".to_string()),
        FieldType::Dropdown | FieldType::Status => field
            .options
            .as_ref()
            .map(|options| format!("({})", options.join("/"))),
        FieldType::Tags => field
            .options
            .as_ref()
            .map(|options| format!("(comma separated: {})", options.join(", "))),
        _ => None,
    }
}

/// Error produced when parsing a respondent's raw input.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}
