use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a question. The set is closed at build time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    Name,
    Email,
    Location,
    Education,
    JobStatus,
    PeopleSkills,
    Motivation,
    Attitude,
    Success,
}

impl QuestionId {
    /// Terminal id reached when the questionnaire completes.
    pub const SUCCESS: QuestionId = QuestionId::Success;

    pub const ALL: [QuestionId; 9] = [
        QuestionId::Name,
        QuestionId::Email,
        QuestionId::Location,
        QuestionId::Education,
        QuestionId::JobStatus,
        QuestionId::PeopleSkills,
        QuestionId::Motivation,
        QuestionId::Attitude,
        QuestionId::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::Name => "name",
            QuestionId::Email => "email",
            QuestionId::Location => "location",
            QuestionId::Education => "education",
            QuestionId::JobStatus => "jobStatus",
            QuestionId::PeopleSkills => "peopleSkills",
            QuestionId::Motivation => "motivation",
            QuestionId::Attitude => "attitude",
            QuestionId::Success => "success",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a token does not name a known question id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question id '{0}'")]
pub struct UnknownQuestionId(pub String);

impl FromStr for QuestionId {
    type Err = UnknownQuestionId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        QuestionId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| UnknownQuestionId(raw.to_string()))
    }
}

/// Validation rules attached to a free-text question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextValidation {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_error: Option<String>,
}

/// Free-text question with a single unconditional successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextQuestion {
    pub id: QuestionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<TextValidation>,
    #[serde(default)]
    pub next_question: Option<QuestionId>,
}

/// Selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub next_question: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualify_message: Option<String>,
}

impl AnswerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            next_question: None,
            disqualify_message: None,
        }
    }

    pub fn leads_to(mut self, next: QuestionId) -> Self {
        self.next_question = Some(next);
        self
    }

    /// Disqualification text, if the option carries a non-empty one. An empty
    /// message does not disqualify.
    pub fn disqualifier(&self) -> Option<&str> {
        self.disqualify_message
            .as_deref()
            .filter(|message| !message.is_empty())
    }

    /// Turns the option into a terminal disqualifier.
    pub fn disqualifies(mut self, message: impl Into<String>) -> Self {
        self.next_question = None;
        self.disqualify_message = Some(message.into());
        self
    }
}

/// Single- or multi-select question whose options carry the branching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub id: QuestionId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub allow_multiple: bool,
}

impl ChoiceQuestion {
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// A node of the question graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    Text(TextQuestion),
    Choice(ChoiceQuestion),
}

impl Question {
    pub fn id(&self) -> QuestionId {
        match self {
            Question::Text(question) => question.id,
            Question::Choice(question) => question.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Question::Text(question) => &question.title,
            Question::Choice(question) => &question.title,
        }
    }

    pub fn helper_text(&self) -> Option<&str> {
        match self {
            Question::Text(question) => question.helper_text.as_deref(),
            Question::Choice(question) => question.helper_text.as_deref(),
        }
    }

    /// Every successor id this question can branch to.
    pub fn successors(&self) -> Vec<QuestionId> {
        match self {
            Question::Text(question) => question.next_question.into_iter().collect(),
            Question::Choice(question) => question
                .options
                .iter()
                .filter_map(|option| option.next_question)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_parses_camel_case_tokens() {
        for id in QuestionId::ALL {
            assert_eq!(id.as_str().parse::<QuestionId>(), Ok(id));
        }
        assert_eq!(
            "job_status".parse::<QuestionId>(),
            Err(UnknownQuestionId("job_status".into()))
        );
    }

    #[test]
    fn question_id_serde_matches_display() {
        let json = serde_json::to_string(&QuestionId::PeopleSkills).unwrap();
        assert_eq!(json, "\"peopleSkills\"");
        assert_eq!(QuestionId::PeopleSkills.to_string(), "peopleSkills");
    }

    #[test]
    fn question_is_tagged_by_type() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "type": "text",
            "id": "email",
            "title": "Email?",
            "validation": { "required": true, "customError": "bad" },
            "nextQuestion": "location"
        }))
        .unwrap();
        assert_eq!(question.id(), QuestionId::Email);
        assert_eq!(question.successors(), vec![QuestionId::Location]);
        match question {
            Question::Text(text) => {
                let validation = text.validation.unwrap();
                assert!(validation.required);
                assert_eq!(validation.custom_error.as_deref(), Some("bad"));
            }
            Question::Choice(_) => panic!("expected text question"),
        }
    }
}
