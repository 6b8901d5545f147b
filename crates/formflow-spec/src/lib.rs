#![allow(missing_docs)]

pub mod answers;
pub mod progress;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod session;
pub mod spec;
pub mod storage;
pub mod validate;

pub use answers::{AnswerExport, AnswerValue, Answers, ExportError, Meta};
pub use progress::{Progress, progress};
pub use render::{
    RenderKind, RenderOption, RenderPayload, RenderQuestion, build_render_payload,
    render_json_ui, render_text,
};
pub use resolve::{Resolution, resolve};
pub use schema::{questionnaire_schema, session_schema};
pub use session::{STORAGE_KEY, Session, SessionStore, Status, Transition};
pub use spec::{
    AnswerOption, ChoiceQuestion, FinalMessages, GraphIssue, Question, QuestionId, Questionnaire,
    QuestionnaireError, TextQuestion, TextValidation, credit_manager_questionnaire,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use validate::{ValidationError, validate_text};
