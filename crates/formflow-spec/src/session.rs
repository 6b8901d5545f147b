use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::answers::{AnswerExport, AnswerValue, Answers, ExportError};
use crate::progress::{Progress, progress};
use crate::resolve::resolve;
use crate::spec::form::Questionnaire;
use crate::spec::question::{Question, QuestionId};
use crate::storage::KeyValueStore;
use crate::validate::{ValidationError, validate_text};

/// Fixed storage key the session is persisted under.
pub const STORAGE_KEY: &str = "form-flow-state";

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    InProgress,
    Completed,
    Disqualified,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InProgress => "inProgress",
            Status::Completed => "completed",
            Status::Disqualified => "disqualified",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// A respondent's progress through the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_question_id: Option<QuestionId>,
    pub answers: Answers,
    pub status: Status,
    pub disqualify_message: Option<String>,
}

impl Session {
    pub fn initial(questionnaire: &Questionnaire) -> Self {
        Self {
            current_question_id: questionnaire.first_question_id(),
            answers: Answers::new(),
            status: Status::InProgress,
            disqualify_message: None,
        }
    }

    /// Parses a persisted session. Only malformed JSON is an error; every
    /// structural mismatch falls back to a safe value.
    pub fn from_stored(raw: &str, questionnaire: &Questionnaire) -> Result<Self, serde_json::Error> {
        let parsed: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&parsed, questionnaire))
    }

    pub fn from_value(value: &Value, questionnaire: &Questionnaire) -> Self {
        let Some(object) = value.as_object() else {
            return Self::initial(questionnaire);
        };

        let status = match object.get("status").and_then(Value::as_str) {
            Some("completed") => Status::Completed,
            Some("disqualified") => Status::Disqualified,
            _ => Status::InProgress,
        };

        let stored_id = object
            .get("currentQuestionId")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<QuestionId>().ok())
            .filter(|id| questionnaire.contains(*id));
        let current_question_id = match status {
            Status::InProgress => stored_id.or_else(|| questionnaire.first_question_id()),
            Status::Completed => stored_id.or_else(|| questionnaire.success_question_id()),
            Status::Disqualified => stored_id,
        };

        let answers = object
            .get("answers")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(key, value)| {
                        let id = key.parse::<QuestionId>().ok()?;
                        if !questionnaire.contains(id) {
                            return None;
                        }
                        Some((id, AnswerValue::from_json(value)?))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let disqualify_message = match status {
            Status::Disqualified => object
                .get("disqualifyMessage")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        Self {
            current_question_id,
            answers,
            status,
            disqualify_message,
        }
    }
}

/// What a call to [`SessionStore::submit_answer`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// The session is terminal or the question is not in the graph.
    Ignored,
    /// The value failed validation; nothing was recorded.
    Rejected { error: ValidationError },
    /// Nothing was selected, the session stays on the question.
    Stayed { question_id: QuestionId },
    Advanced { question_id: QuestionId },
    Completed,
    Disqualified { message: Option<String> },
}

/// Holds the live session and keeps its persisted copy in sync.
pub struct SessionStore<'q, S: KeyValueStore> {
    questionnaire: &'q Questionnaire,
    storage: S,
    session: Session,
}

impl<'q, S: KeyValueStore> SessionStore<'q, S> {
    /// Restores the persisted session, or starts fresh when there is none or
    /// it cannot be read.
    pub fn new(questionnaire: &'q Questionnaire, storage: S) -> Self {
        let session = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match Session::from_stored(&raw, questionnaire) {
                Ok(session) => session,
                Err(err) => {
                    warn!(error = %err, "failed to parse stored form flow state");
                    Session::initial(questionnaire)
                }
            },
            Ok(None) => Session::initial(questionnaire),
            Err(err) => {
                warn!(error = %err, "failed to read stored form flow state");
                Session::initial(questionnaire)
            }
        };
        Self {
            questionnaire,
            storage,
            session,
        }
    }

    pub fn questionnaire(&self) -> &'q Questionnaire {
        self.questionnaire
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_question(&self) -> Option<&'q Question> {
        self.session
            .current_question_id
            .and_then(|id| self.questionnaire.question(id))
    }

    pub fn answers(&self) -> &Answers {
        &self.session.answers
    }

    pub fn status(&self) -> Status {
        self.session.status
    }

    pub fn disqualify_message(&self) -> Option<&str> {
        self.session.disqualify_message.as_deref()
    }

    /// Message to show once the session is terminal.
    pub fn final_message(&self) -> Option<&str> {
        let messages = &self.questionnaire.final_messages;
        match self.session.status {
            Status::InProgress => None,
            Status::Completed => Some(messages.success.as_str()),
            Status::Disqualified => self
                .session
                .disqualify_message
                .as_deref()
                .or(messages.disqualified.as_deref()),
        }
    }

    pub fn progress(&self) -> Progress {
        progress(self.questionnaire, self.session.current_question_id)
    }

    /// Packages the answers for delivery once the session has completed.
    pub fn export(&self) -> Result<AnswerExport, ExportError> {
        if self.session.status != Status::Completed {
            return Err(ExportError::NotCompleted);
        }
        Ok(AnswerExport::new(
            self.questionnaire.id.clone(),
            self.session.answers.clone(),
        ))
    }

    pub fn submit_answer(&mut self, question_id: QuestionId, value: impl Into<Value>) -> Transition {
        if self.session.status != Status::InProgress {
            return Transition::Ignored;
        }
        let Some(question) = self.questionnaire.question(question_id) else {
            return Transition::Ignored;
        };

        let value = normalize(question, &value.into());
        if let (Question::Text(text), AnswerValue::Single(raw)) = (question, &value)
            && let Err(error) = validate_text(text, raw)
        {
            debug!(question = %question_id, code = %error.code, "answer rejected");
            return Transition::Rejected { error };
        }

        let resolution = resolve(question, &value);
        let mut answers = self.session.answers.clone();
        answers.insert(question_id, value);

        let (next, transition) = match (resolution.status, resolution.next_question_id) {
            (Status::Disqualified, _) => {
                let message = resolution.disqualify_message.or_else(|| {
                    self.questionnaire.final_messages.disqualified.clone()
                });
                let session = Session {
                    current_question_id: None,
                    answers,
                    status: Status::Disqualified,
                    disqualify_message: message.clone(),
                };
                (session, Transition::Disqualified { message })
            }
            (Status::InProgress, Some(next_id)) => {
                let transition = if next_id == question_id {
                    Transition::Stayed { question_id }
                } else {
                    Transition::Advanced {
                        question_id: next_id,
                    }
                };
                let session = Session {
                    current_question_id: Some(next_id),
                    answers,
                    status: Status::InProgress,
                    disqualify_message: None,
                };
                (session, transition)
            }
            // Anything else has run out of questions.
            _ => {
                let session = Session {
                    current_question_id: self.questionnaire.success_question_id(),
                    answers,
                    status: Status::Completed,
                    disqualify_message: None,
                };
                (session, Transition::Completed)
            }
        };

        debug!(question = %question_id, status = next.status.as_str(), "answer submitted");
        self.session = next;
        self.persist();
        transition
    }

    /// Restores the initial session, overwriting the persisted copy.
    pub fn reset(&mut self) {
        self.session = Session::initial(self.questionnaire);
        debug!("session reset");
        self.persist();
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.session) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize form flow state");
                return;
            }
        };
        if let Err(err) = self.storage.set(STORAGE_KEY, &raw) {
            warn!(error = %err, "failed to persist form flow state");
        }
    }
}

/// Coerces a raw submission into the shape the question expects.
fn normalize(question: &Question, value: &Value) -> AnswerValue {
    match question {
        Question::Text(_) => AnswerValue::Single(value.as_str().unwrap_or_default().to_string()),
        Question::Choice(choice) if choice.allow_multiple => AnswerValue::Multiple(match value {
            Value::Array(entries) => entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Value::String(token) => vec![token.clone()],
            _ => Vec::new(),
        }),
        Question::Choice(_) => AnswerValue::Single(match value {
            Value::Array(entries) => entries
                .first()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Value::String(token) => token.clone(),
            _ => String::new(),
        }),
    }
}
