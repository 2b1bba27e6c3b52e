#![allow(missing_docs)]

pub mod answers;
pub mod item;
pub mod logic;
pub mod render;
pub mod schema;
pub mod session;
pub mod spec;
pub mod store;
pub mod submit;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerMap, encode_checkbox, join_tags, split_tags};
pub use item::{
    Board, Column, ColumnValue, ItemError, MemoryBoard, WorkItem, WorkItemClient, column_values,
    prefill_from_item,
};
pub use logic::{FieldLogic, LogicAction, LogicCondition, LogicOperator};
pub use render::{
    RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload, render_json_ui,
    render_text,
};
pub use schema::generate as answers_schema;
pub use session::{
    FormSession, SessionStatus, SinkError, SubmissionPayload, SubmissionSink, SubmitAttempt,
    SubmitReceipt,
};
pub use spec::{ColumnLink, FieldType, Form, FormField, FormSettings, FormTheme, Submission, WriteBackState};
pub use store::{FormStore, MemoryStore, StoreError, SubmissionStore};
pub use submit::{StoreSink, SubmitError, SubmitOutcome, SubmitRequest, accept};
pub use validate::{ErrorMap, validate};
pub use visibility::{VisibilityMap, is_visible, resolve_visibility};
