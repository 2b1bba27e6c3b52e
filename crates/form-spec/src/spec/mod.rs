pub mod field;
pub mod form;
pub mod submission;

pub use field::{ColumnLink, FieldType, FormField};
pub use form::{Form, FormSettings, FormTheme};
pub use submission::{Submission, WriteBackState};
