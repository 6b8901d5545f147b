use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::{QuestionId, TextQuestion};

/// Why a text submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub question_id: QuestionId,
    pub message: String,
    pub code: String,
}

/// Checks a free-text value against the question's rules. Blank input is
/// always refused; `required` only selects the error code.
pub fn validate_text(question: &TextQuestion, value: &str) -> Result<(), ValidationError> {
    let rules = question.validation.as_ref();
    let custom = rules.and_then(|rules| rules.custom_error.clone());

    if value.trim().is_empty() {
        let code = if rules.is_some_and(|rules| rules.required) {
            "required"
        } else {
            "empty"
        };
        return Err(ValidationError {
            question_id: question.id,
            message: custom.unwrap_or_else(|| "a value is required".into()),
            code: code.into(),
        });
    }

    if let Some(pattern) = rules.and_then(|rules| rules.pattern.as_deref())
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(value)
    {
        return Err(ValidationError {
            question_id: question.id,
            message: custom.unwrap_or_else(|| "value does not match pattern".into()),
            code: "pattern_mismatch".into(),
        });
    }

    Ok(())
}
