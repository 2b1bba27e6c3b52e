use std::sync::Mutex;

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::answers::AnswerMap;
use crate::logic::{FieldLogic, LogicAction, LogicCondition, LogicOperator};
use crate::spec::field::{FieldType, FormField};
use crate::spec::form::Form;
use crate::spec::submission::{Submission, WriteBackState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("form '{0}' not found")]
    FormNotFound(String),
    #[error("submission '{0}' not found")]
    SubmissionNotFound(String),
    #[error("id '{0}' already exists")]
    DuplicateId(String),
    #[error("store lock poisoned")]
    Poisoned,
}

/// CRUD surface over stored forms.
///
/// The evaluator and validator never see this trait; they operate on plain
/// `Form`/`AnswerMap` values handed to them.
pub trait FormStore {
    /// Persists a form, minting an id and timestamps when the draft has none.
    fn create_form(&self, draft: Form) -> Result<Form, StoreError>;
    fn form(&self, form_id: &str) -> Result<Form, StoreError>;
    fn forms_by_board(&self, board_id: &str) -> Result<Vec<Form>, StoreError>;
    /// Replaces the editable content of a stored form; `created_at` and the
    /// submission counter are preserved.
    fn update_form(&self, form: Form) -> Result<Form, StoreError>;
    fn delete_form(&self, form_id: &str) -> Result<bool, StoreError>;
    fn increment_submission_count(&self, form_id: &str) -> Result<(), StoreError>;
}

/// CRUD surface over stored submissions.
pub trait SubmissionStore {
    /// Persists a submission, minting an id and stamping `submitted_at`.
    fn create_submission(&self, draft: Submission) -> Result<Submission, StoreError>;
    fn submission(&self, submission_id: &str) -> Result<Submission, StoreError>;
    /// Submissions for one form, newest first.
    fn submissions_by_form(&self, form_id: &str) -> Result<Vec<Submission>, StoreError>;
    /// Records the write-back outcome after the submission is persisted.
    fn set_write_back(
        &self,
        submission_id: &str,
        state: WriteBackState,
    ) -> Result<(), StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    forms: Vec<Form>,
    submissions: Vec<Submission>,
    next_id: u64,
}

impl MemoryInner {
    fn mint(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-memory store backing tests and the CLI.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
        }
    }

    /// Store preloaded with the demo board's forms and a few submissions.
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.forms = seed_forms();
            inner.submissions = seed_submissions();
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore for MemoryStore {
    fn create_form(&self, mut draft: Form) -> Result<Form, StoreError> {
        let mut inner = self.lock()?;
        if draft.id.is_empty() {
            draft.id = inner.mint("form");
        } else if inner.forms.iter().any(|form| form.id == draft.id) {
            return Err(StoreError::DuplicateId(draft.id));
        }
        let now = timestamp();
        draft.submission_count = 0;
        draft.created_at = now.clone();
        draft.updated_at = now;
        inner.forms.push(draft.clone());
        Ok(draft)
    }

    fn form(&self, form_id: &str) -> Result<Form, StoreError> {
        let inner = self.lock()?;
        inner
            .forms
            .iter()
            .find(|form| form.id == form_id)
            .cloned()
            .ok_or_else(|| StoreError::FormNotFound(form_id.to_string()))
    }

    fn forms_by_board(&self, board_id: &str) -> Result<Vec<Form>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .forms
            .iter()
            .filter(|form| form.board_id == board_id)
            .cloned()
            .collect())
    }

    fn update_form(&self, mut form: Form) -> Result<Form, StoreError> {
        let mut inner = self.lock()?;
        let Some(stored) = inner.forms.iter_mut().find(|stored| stored.id == form.id) else {
            return Err(StoreError::FormNotFound(form.id));
        };
        form.created_at = stored.created_at.clone();
        form.submission_count = stored.submission_count;
        form.updated_at = timestamp();
        *stored = form.clone();
        Ok(form)
    }

    fn delete_form(&self, form_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.forms.len();
        inner.forms.retain(|form| form.id != form_id);
        Ok(inner.forms.len() < before)
    }

    fn increment_submission_count(&self, form_id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let Some(form) = inner.forms.iter_mut().find(|form| form.id == form_id) else {
            return Err(StoreError::FormNotFound(form_id.to_string()));
        };
        form.submission_count += 1;
        Ok(())
    }
}

impl SubmissionStore for MemoryStore {
    fn create_submission(&self, mut draft: Submission) -> Result<Submission, StoreError> {
        let mut inner = self.lock()?;
        if draft.id.is_empty() {
            draft.id = inner.mint("sub");
        } else if inner.submissions.iter().any(|sub| sub.id == draft.id) {
            return Err(StoreError::DuplicateId(draft.id));
        }
        draft.submitted_at = timestamp();
        inner.submissions.push(draft.clone());
        Ok(draft)
    }

    fn submission(&self, submission_id: &str) -> Result<Submission, StoreError> {
        let inner = self.lock()?;
        inner
            .submissions
            .iter()
            .find(|sub| sub.id == submission_id)
            .cloned()
            .ok_or_else(|| StoreError::SubmissionNotFound(submission_id.to_string()))
    }

    fn submissions_by_form(&self, form_id: &str) -> Result<Vec<Submission>, StoreError> {
        let inner = self.lock()?;
        let mut list: Vec<Submission> = inner
            .submissions
            .iter()
            .rev()
            .filter(|sub| sub.form_id == form_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(list)
    }

    fn set_write_back(
        &self,
        submission_id: &str,
        state: WriteBackState,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let Some(sub) = inner
            .submissions
            .iter_mut()
            .find(|sub| sub.id == submission_id)
        else {
            return Err(StoreError::SubmissionNotFound(submission_id.to_string()));
        };
        sub.write_back = state;
        Ok(())
    }
}

fn seed_forms() -> Vec<Form> {
    let feedback = Form {
        id: "form-001".to_string(),
        title: "Customer Feedback".to_string(),
        description: "Tell us about your experience.".to_string(),
        board_id: "demo".to_string(),
        workspace_id: "demo".to_string(),
        fields: vec![
            FormField::new("field-1", FieldType::Text, "Full Name").required(true),
            FormField::new("field-2", FieldType::Email, "Email Address").required(true),
            FormField::new("field-3", FieldType::Dropdown, "How satisfied are you?")
                .required(true)
                .with_options(vec![
                    "Very Satisfied",
                    "Satisfied",
                    "Neutral",
                    "Dissatisfied",
                ]),
            FormField::new("field-4", FieldType::LongText, "What went wrong?").with_logic(
                FieldLogic {
                    conditions: vec![LogicCondition {
                        field_id: "field-3".to_string(),
                        operator: LogicOperator::Equals,
                        value: "Dissatisfied".to_string(),
                    }],
                    action: LogicAction::Show,
                },
            ),
        ],
        settings: crate::spec::form::FormSettings {
            success_message: "Thank you for your feedback!".to_string(),
            ..Default::default()
        },
        submission_count: 2,
        is_active: true,
        created_at: "2025-01-10T10:00:00Z".to_string(),
        updated_at: "2025-01-10T10:00:00Z".to_string(),
    };

    let bug_report = Form {
        id: "form-002".to_string(),
        title: "Bug Report".to_string(),
        description: "Report a problem with the product.".to_string(),
        board_id: "demo".to_string(),
        workspace_id: "demo".to_string(),
        fields: vec![
            FormField::new("field-1", FieldType::Text, "Bug Title").required(true),
            FormField::new("field-2", FieldType::Dropdown, "Severity")
                .required(true)
                .with_options(vec!["Critical", "High", "Medium", "Low"]),
            FormField::new("field-3", FieldType::LongText, "Steps to Reproduce").required(true),
        ],
        settings: crate::spec::form::FormSettings {
            allow_update: true,
            success_message: "Bug reported! Our team will look into it.".to_string(),
            ..Default::default()
        },
        submission_count: 1,
        is_active: true,
        created_at: "2025-01-15T09:00:00Z".to_string(),
        updated_at: "2025-01-15T09:00:00Z".to_string(),
    };

    vec![feedback, bug_report]
}

fn seed_submissions() -> Vec<Submission> {
    vec![
        Submission {
            id: "sub-001".to_string(),
            form_id: "form-001".to_string(),
            board_id: "demo".to_string(),
            answers: AnswerMap::from_iter([
                ("field-1", "Alice Johnson"),
                ("field-2", "alice@example.com"),
                ("field-3", "Very Satisfied"),
            ]),
            external_item_id: None,
            is_update: false,
            write_back: WriteBackState::Skipped,
            submitted_at: "2025-01-11T14:23:00Z".to_string(),
        },
        Submission {
            id: "sub-002".to_string(),
            form_id: "form-001".to_string(),
            board_id: "demo".to_string(),
            answers: AnswerMap::from_iter([
                ("field-1", "Bob Smith"),
                ("field-2", "bob@example.com"),
                ("field-3", "Dissatisfied"),
                ("field-4", "Checkout kept timing out."),
            ]),
            external_item_id: None,
            is_update: false,
            write_back: WriteBackState::Skipped,
            submitted_at: "2025-01-12T09:10:00Z".to_string(),
        },
        Submission {
            id: "sub-003".to_string(),
            form_id: "form-002".to_string(),
            board_id: "demo".to_string(),
            answers: AnswerMap::from_iter([
                ("field-1", "Login button unresponsive on Safari"),
                ("field-2", "High"),
                ("field-3", "1. Open Safari\n2. Go to login\n3. Click Sign In"),
            ]),
            external_item_id: None,
            is_update: false,
            write_back: WriteBackState::Skipped,
            submitted_at: "2025-01-16T11:00:00Z".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, board: &str) -> Form {
        Form::new(title, board)
    }

    #[test]
    fn create_mints_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.create_form(draft("A", "b1")).unwrap();
        let second = store.create_form(draft("B", "b1")).unwrap();
        assert_eq!(first.id, "form-1");
        assert_eq!(second.id, "form-2");
        assert!(!first.created_at.is_empty());
    }

    #[test]
    fn create_rejects_duplicate_explicit_id() {
        let store = MemoryStore::new();
        let mut form = draft("A", "b1");
        form.id = "custom".to_string();
        store.create_form(form.clone()).unwrap();
        assert!(matches!(
            store.create_form(form),
            Err(StoreError::DuplicateId(_))
        ));
    }

    #[test]
    fn update_preserves_created_at_and_count() {
        let store = MemoryStore::new();
        let stored = store.create_form(draft("A", "b1")).unwrap();
        store.increment_submission_count(&stored.id).unwrap();

        let mut edited = stored.clone();
        edited.title = "Renamed".to_string();
        edited.created_at = "tampered".to_string();
        edited.submission_count = 99;
        let updated = store.update_form(edited).unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.submission_count, 1);
    }

    #[test]
    fn forms_by_board_filters() {
        let store = MemoryStore::new();
        store.create_form(draft("A", "b1")).unwrap();
        store.create_form(draft("B", "b2")).unwrap();
        store.create_form(draft("C", "b1")).unwrap();
        let forms = store.forms_by_board("b1").unwrap();
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn delete_reports_presence() {
        let store = MemoryStore::new();
        let stored = store.create_form(draft("A", "b1")).unwrap();
        assert!(store.delete_form(&stored.id).unwrap());
        assert!(!store.delete_form(&stored.id).unwrap());
        assert!(matches!(
            store.form(&stored.id),
            Err(StoreError::FormNotFound(_))
        ));
    }

    #[test]
    fn submissions_come_back_newest_first() {
        let store = MemoryStore::seeded();
        let subs = store.submissions_by_form("form-001").unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].id, "sub-002");
        assert_eq!(subs[1].id, "sub-001");
    }

    #[test]
    fn seeded_forms_pass_their_own_checks() {
        let store = MemoryStore::seeded();
        for form in store.forms_by_board("demo").unwrap() {
            assert!(form.check().is_empty(), "seed form {} has problems", form.id);
        }
    }

    #[test]
    fn write_back_state_is_recorded() {
        let store = MemoryStore::seeded();
        store
            .set_write_back(
                "sub-001",
                WriteBackState::Failed {
                    reason: "backend down".to_string(),
                },
            )
            .unwrap();
        let sub = store.submission("sub-001").unwrap();
        assert!(matches!(sub.write_back, WriteBackState::Failed { .. }));
    }
}
