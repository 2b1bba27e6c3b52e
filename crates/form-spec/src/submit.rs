use thiserror::Error;

use crate::answers::AnswerMap;
use crate::item::{WorkItemClient, column_values};
use crate::session::{SinkError, SubmissionPayload, SubmissionSink, SubmitReceipt};
use crate::spec::form::Form;
use crate::spec::submission::{Submission, WriteBackState};
use crate::store::{FormStore, StoreError, SubmissionStore};
use crate::validate::{ErrorMap, validate};
use crate::visibility::is_visible;

/// What a respondent's client sends to the intake path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub form_id: String,
    pub answers: AnswerMap,
    pub external_item_id: Option<String>,
}

/// Accepted submission plus the success copy configured on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub submission: Submission,
    pub message: String,
    pub redirect_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Form not found")]
    FormNotFound,
    #[error("This form is no longer active")]
    FormInactive,
    #[error("submission failed validation")]
    Invalid(ErrorMap),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Accepts one submission against the stored form.
///
/// Visibility and required/format rules are re-derived here from the stored
/// form rather than trusted from the client: keys for unknown or hidden
/// fields are dropped, then the surviving answers are validated. After the
/// record is persisted the work-item write-back runs sequentially; its
/// failure flags the stored submission but never fails the request and
/// never rolls the record back.
pub fn accept<S>(
    store: &S,
    client: Option<&dyn WorkItemClient>,
    request: SubmitRequest,
) -> Result<SubmitOutcome, SubmitError>
where
    S: FormStore + SubmissionStore,
{
    let form = match store.form(&request.form_id) {
        Ok(form) => form,
        Err(StoreError::FormNotFound(_)) => return Err(SubmitError::FormNotFound),
        Err(err) => return Err(SubmitError::Store(err)),
    };
    if !form.is_active {
        return Err(SubmitError::FormInactive);
    }

    let accepted = strip_hidden(&form, &request.answers);
    let errors = validate(&form, &accepted);
    if !errors.is_empty() {
        return Err(SubmitError::Invalid(errors));
    }

    let is_update = request.external_item_id.is_some();
    let mut submission = store.create_submission(Submission {
        id: String::new(),
        form_id: form.id.clone(),
        board_id: form.board_id.clone(),
        answers: accepted.clone(),
        external_item_id: request.external_item_id,
        is_update,
        write_back: WriteBackState::Skipped,
        submitted_at: String::new(),
    })?;
    store.increment_submission_count(&form.id)?;

    if let Some(client) = client
        && !form.board_id.is_empty()
    {
        let state = write_back(client, &form, &submission, &accepted);
        if state != WriteBackState::Skipped {
            store.set_write_back(&submission.id, state.clone())?;
            submission.write_back = state;
        }
    }

    Ok(SubmitOutcome {
        submission,
        message: form.settings.success_message.clone(),
        redirect_url: form.settings.redirect_url.clone(),
    })
}

/// Keeps only answers whose field exists on the form and is visible under
/// the submitted snapshot.
fn strip_hidden(form: &Form, answers: &AnswerMap) -> AnswerMap {
    form.fields
        .iter()
        .filter(|field| answers.contains(&field.id))
        .filter(|field| is_visible(field, answers))
        .map(|field| (field.id.clone(), answers.value_of(&field.id).to_string()))
        .collect()
}

fn write_back(
    client: &dyn WorkItemClient,
    form: &Form,
    submission: &Submission,
    answers: &AnswerMap,
) -> WriteBackState {
    let values = column_values(form, answers);
    if values.is_empty() {
        return WriteBackState::Skipped;
    }

    if let Some(item_id) = &submission.external_item_id
        && form.settings.allow_update
    {
        return match client.update_item(&form.board_id, item_id, &values) {
            Ok(()) => WriteBackState::Done {
                item_id: item_id.clone(),
            },
            Err(err) => WriteBackState::Failed {
                reason: err.to_string(),
            },
        };
    }

    let name = item_name(form, answers);
    match client.create_item(&form.board_id, &name, &values) {
        Ok(item_id) => WriteBackState::Done { item_id },
        Err(err) => WriteBackState::Failed {
            reason: err.to_string(),
        },
    }
}

/// Item name for a created record: the first answered field's value, falling
/// back to the form title.
fn item_name(form: &Form, answers: &AnswerMap) -> String {
    form.fields
        .iter()
        .map(|field| answers.value_of(&field.id))
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| form.title.clone())
}

/// Bridges a respondent session to the intake path, converting intake
/// failures into the banner/terminal taxonomy the session understands.
pub struct StoreSink<'a, S> {
    store: &'a S,
    client: Option<&'a dyn WorkItemClient>,
}

impl<'a, S> StoreSink<'a, S>
where
    S: FormStore + SubmissionStore,
{
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            client: None,
        }
    }

    pub fn with_client(mut self, client: &'a dyn WorkItemClient) -> Self {
        self.client = Some(client);
        self
    }
}

impl<S> SubmissionSink for StoreSink<'_, S>
where
    S: FormStore + SubmissionStore,
{
    fn deliver(&mut self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SinkError> {
        let request = SubmitRequest {
            form_id: payload.form_id.clone(),
            answers: payload.answers.clone(),
            external_item_id: payload.external_item_id.clone(),
        };
        match accept(self.store, self.client, request) {
            Ok(outcome) => Ok(SubmitReceipt {
                message: outcome.message,
                redirect_url: outcome.redirect_url,
            }),
            Err(err @ SubmitError::FormInactive) => Err(SinkError::Closed(err.to_string())),
            Err(err) => Err(SinkError::Transport(err.to_string())),
        }
    }
}
