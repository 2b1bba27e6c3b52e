use thiserror::Error;

use crate::answers::AnswerMap;
use crate::spec::field::FormField;
use crate::spec::form::Form;
use crate::validate::{ErrorMap, validate};
use crate::visibility::is_visible;

/// Payload handed to the submission boundary: exactly the visible fields'
/// answers, in a flat map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub form_id: String,
    pub answers: AnswerMap,
    pub external_item_id: Option<String>,
}

/// What the boundary reports back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: String,
    pub redirect_url: Option<String>,
}

/// Failures the submission boundary can report.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The delivery failed; the session stays editable for a retry.
    #[error("{0}")]
    Transport(String),
    /// The form no longer accepts submissions; terminal for this session.
    #[error("{0}")]
    Closed(String),
}

/// The only asynchronous boundary in the design: delivery of a finished
/// payload. Implementations may talk to a network; the session converts
/// failures into banner state and never leaves them unhandled.
pub trait SubmissionSink {
    fn deliver(&mut self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SinkError>;
}

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Collecting answers; per-field errors may be present.
    Editing,
    /// Delivered; the success message (and optional redirect) is shown.
    Submitted {
        message: String,
        redirect_url: Option<String>,
    },
    /// The form was closed underneath the respondent; no retry path.
    Closed { message: String },
}

/// Outcome of one submit attempt, mirrored in the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Payload delivered; the session reached its terminal state.
    Submitted,
    /// Per-field validation failed; errors are recorded on the session.
    Invalid,
    /// Recoverable delivery failure; a banner is shown, answers are kept.
    Failed,
    /// The form is closed; the session is terminal.
    Rejected,
    /// A submission is already outstanding or the session is terminal.
    Blocked,
}

/// Live state for one respondent filling one form.
///
/// Owns the answer snapshot; visibility is derived on demand and the error
/// map is recomputed only on submit attempts, not on every keystroke.
#[derive(Debug)]
pub struct FormSession {
    form: Form,
    answers: AnswerMap,
    errors: ErrorMap,
    status: SessionStatus,
    banner: Option<String>,
    external_item_id: Option<String>,
    in_flight: bool,
}

impl FormSession {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            answers: AnswerMap::new(),
            errors: ErrorMap::new(),
            status: SessionStatus::Editing,
            banner: None,
            external_item_id: None,
            in_flight: false,
        }
    }

    /// Seeds initial answers before first render. Keys that do not name a
    /// field of this form are ignored.
    pub fn prefill<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            let key = key.into();
            if self.form.field(&key).is_some() {
                self.answers.set(key, value);
            }
        }
    }

    /// Marks this session as updating an existing external item.
    pub fn link_external_item(&mut self, item_id: impl Into<String>) {
        self.external_item_id = Some(item_id.into());
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Replaces one answer and clears that field's recorded error. Other
    /// fields' errors are left alone until the next submit attempt.
    pub fn set_answer(&mut self, field_id: &str, value: impl Into<String>) {
        self.answers.set(field_id, value);
        self.errors.remove(field_id);
    }

    /// Fields that currently render, in form order.
    pub fn visible_fields(&self) -> Vec<&FormField> {
        self.form
            .fields
            .iter()
            .filter(|field| is_visible(field, &self.answers))
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.status, SessionStatus::Editing) && !self.in_flight
    }

    /// Validates and packages the payload without touching session state.
    ///
    /// Fields hidden at this moment are excluded entirely, even if they
    /// held an answer before a rule concealed them.
    pub fn submit_payload(&self) -> Result<SubmissionPayload, ErrorMap> {
        let errors = validate(&self.form, &self.answers);
        if !errors.is_empty() {
            return Err(errors);
        }
        let answers = self
            .visible_fields()
            .into_iter()
            .filter(|field| self.answers.contains(&field.id))
            .map(|field| (field.id.clone(), self.answers.value_of(&field.id).to_string()))
            .collect();
        Ok(SubmissionPayload {
            form_id: self.form.id.clone(),
            answers,
            external_item_id: self.external_item_id.clone(),
        })
    }

    /// Runs a full submit attempt against the given boundary.
    ///
    /// A second submit while one is outstanding is refused rather than
    /// queued, and a terminal session never submits again.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> SubmitAttempt {
        if !self.can_submit() {
            return SubmitAttempt::Blocked;
        }
        let payload = match self.submit_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors;
                return SubmitAttempt::Invalid;
            }
        };
        self.in_flight = true;
        let result = sink.deliver(&payload);
        self.in_flight = false;
        match result {
            Ok(receipt) => {
                self.banner = None;
                self.status = SessionStatus::Submitted {
                    message: receipt.message,
                    redirect_url: receipt.redirect_url,
                };
                SubmitAttempt::Submitted
            }
            Err(SinkError::Closed(message)) => {
                self.status = SessionStatus::Closed { message };
                SubmitAttempt::Rejected
            }
            Err(SinkError::Transport(message)) => {
                self.banner = Some(message);
                SubmitAttempt::Failed
            }
        }
    }
}
