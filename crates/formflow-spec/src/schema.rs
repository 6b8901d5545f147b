use schemars::schema_for;
use serde_json::Value;

use crate::session::Session;
use crate::spec::form::Questionnaire;

/// JSON schema of a question graph definition.
pub fn questionnaire_schema() -> Result<Value, serde_json::Error> {
    serde_json::to_value(schema_for!(Questionnaire))
}

/// JSON schema of the persisted session.
pub fn session_schema() -> Result<Value, serde_json::Error> {
    serde_json::to_value(schema_for!(Session))
}
