use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;

/// Result of the sequential work-item write-back for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WriteBackState {
    /// The form has no board linkage, or no client was configured.
    #[default]
    Skipped,
    /// The linked item was created or updated.
    Done { item_id: String },
    /// The submission is persisted but the item write failed; the record is
    /// kept flagged for reconciliation, never rolled back.
    Failed { reason: String },
}

/// One accepted response to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Submission {
    #[serde(default)]
    pub id: String,
    pub form_id: String,
    #[serde(default)]
    pub board_id: String,
    pub answers: AnswerMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_item_id: Option<String>,
    #[serde(default)]
    pub is_update: bool,
    #[serde(default)]
    pub write_back: WriteBackState,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub submitted_at: String,
}
