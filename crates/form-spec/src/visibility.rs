use crate::answers::AnswerMap;
use crate::spec::field::FormField;
use crate::spec::form::Form;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Decides whether a field renders given the current answers.
///
/// A field with no rule is always visible. Visibility is a pure read of the
/// answer state, never chained through other fields' visibility, so a
/// condition may read a currently-hidden field's stale answer.
pub fn is_visible(field: &FormField, answers: &AnswerMap) -> bool {
    match &field.logic {
        Some(logic) => logic.evaluate(answers),
        None => true,
    }
}

/// Visibility of every field in the form, keyed by field id.
///
/// Recomputed fresh per call; condition dependencies are not tracked
/// statically, so any answer change invalidates the whole map.
pub fn resolve_visibility(form: &Form, answers: &AnswerMap) -> VisibilityMap {
    form.fields
        .iter()
        .map(|field| (field.id.clone(), is_visible(field, answers)))
        .collect()
}
