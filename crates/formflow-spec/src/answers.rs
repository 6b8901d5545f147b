use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_cbor::{to_vec, value::to_value};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::spec::question::QuestionId;

/// Value recorded for a question: one token or an ordered set of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    /// Selected tokens, with a single value wrapped as a one-element set.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            AnswerValue::Single(value) => vec![value.as_str()],
            AnswerValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Accepts only a JSON string or an array made entirely of strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(AnswerValue::Single(text.clone())),
            Value::Array(entries) => entries
                .iter()
                .map(|entry| entry.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(AnswerValue::Multiple),
            _ => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Multiple(values)
    }
}

/// Answers keyed by question id.
pub type Answers = BTreeMap<QuestionId, AnswerValue>;

/// Optional metadata paired with an `AnswerExport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

/// Payload handed to a downstream delivery mechanism once a session completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerExport {
    pub form_id: String,
    pub answers: Answers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Errors raised while building or encoding an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("session is not completed")]
    NotCompleted,
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("cbor encoding failed: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnswerExport {
    pub fn new(form_id: impl Into<String>, answers: Answers) -> Self {
        Self {
            form_id: form_id.into(),
            answers,
            meta: None,
        }
    }

    /// Stamps the export with the current UTC time.
    pub fn stamped(mut self) -> Result<Self, ExportError> {
        let exported_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        self.meta = Some(Meta {
            exported_at: Some(exported_at),
        });
        Ok(self)
    }

    /// Serializes the export as canonical CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, ExportError> {
        let canonical = to_value(self)?;
        Ok(to_vec(&canonical)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
