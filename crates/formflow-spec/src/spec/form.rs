use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::question::{Question, QuestionId};

/// Messages shown once the questionnaire reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalMessages {
    pub success: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualified: Option<String>,
}

/// Static question graph. Questions are kept in declaration order; the first
/// one is where every fresh session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: String,
    pub questions: Vec<Question>,
    pub final_messages: FinalMessages,
}

/// Structural defects of a question graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIssue {
    #[error("questionnaire has no questions")]
    Empty,
    #[error("question '{0}' is declared more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question '{from}' points to '{to}', which is not in the graph")]
    DanglingReference { from: QuestionId, to: QuestionId },
    #[error("option '{option}' of '{question}' disqualifies but still declares a next question")]
    DisqualifierWithNext { question: QuestionId, option: String },
    #[error("question '{question}' declares an invalid pattern '{pattern}'")]
    InvalidPattern { question: QuestionId, pattern: String },
    #[error("questionnaire has no '{}' question", QuestionId::SUCCESS)]
    MissingSuccess,
}

/// Errors raised while loading a questionnaire definition.
#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("failed to read questionnaire {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid questionnaire json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Questionnaire {
    pub fn from_json(raw: &str) -> Result<Self, QuestionnaireError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, QuestionnaireError> {
        let raw = std::fs::read_to_string(path).map_err(|source| QuestionnaireError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.question(id).is_some()
    }

    pub fn first_question_id(&self) -> Option<QuestionId> {
        self.questions.first().map(Question::id)
    }

    /// The terminal success id, when the graph declares a question for it.
    pub fn success_question_id(&self) -> Option<QuestionId> {
        self.question(QuestionId::SUCCESS).map(Question::id)
    }

    /// Declaration index of a question.
    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id() == id)
    }

    /// Message the given token would disqualify with when chosen on its own.
    pub fn disqualifying_answer(&self, id: QuestionId, value: &str) -> Option<&str> {
        match self.question(id)? {
            Question::Choice(choice) => choice.option(value)?.disqualifier(),
            Question::Text(_) => None,
        }
    }

    /// Collects every structural defect of the graph.
    pub fn check(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        if self.questions.is_empty() {
            issues.push(GraphIssue::Empty);
            return issues;
        }

        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.id()) {
                issues.push(GraphIssue::DuplicateQuestion(question.id()));
            }
        }

        for question in &self.questions {
            for next in question.successors() {
                if !next.is_success() && !seen.contains(&next) {
                    issues.push(GraphIssue::DanglingReference {
                        from: question.id(),
                        to: next,
                    });
                }
            }
            match question {
                Question::Choice(choice) => {
                    for option in &choice.options {
                        if option.disqualifier().is_some() && option.next_question.is_some() {
                            issues.push(GraphIssue::DisqualifierWithNext {
                                question: choice.id,
                                option: option.value.clone(),
                            });
                        }
                    }
                }
                Question::Text(text) => {
                    if let Some(pattern) = text
                        .validation
                        .as_ref()
                        .and_then(|rules| rules.pattern.as_deref())
                        && Regex::new(pattern).is_err()
                    {
                        issues.push(GraphIssue::InvalidPattern {
                            question: text.id,
                            pattern: pattern.to_string(),
                        });
                    }
                }
            }
        }

        if !seen.contains(&QuestionId::SUCCESS) {
            issues.push(GraphIssue::MissingSuccess);
        }
        issues
    }
}
