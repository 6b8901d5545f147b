use serde_json::{Value, json};

use crate::answers::AnswerValue;
use crate::progress::Progress;
use crate::session::{SessionStore, Status};
use crate::spec::question::{Question, QuestionId};
use crate::storage::KeyValueStore;

/// Kind of input a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Text,
    SingleChoice,
    MultiChoice,
}

impl RenderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderKind::Text => "text",
            RenderKind::SingleChoice => "single_choice",
            RenderKind::MultiChoice => "multi_choice",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOption {
    pub value: String,
    pub label: String,
}

/// Describes the current question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: QuestionId,
    pub kind: RenderKind,
    pub title: String,
    pub helper_text: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub options: Vec<RenderOption>,
    pub current_value: Option<AnswerValue>,
}

/// Snapshot of the session consumed by the presentation layer.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub status: Status,
    pub question: Option<RenderQuestion>,
    pub progress: Progress,
    pub final_message: Option<String>,
}

pub fn build_render_payload<S: KeyValueStore>(store: &SessionStore<'_, S>) -> RenderPayload {
    let question = store.current_question().map(|question| {
        let (kind, placeholder, required, options) = match question {
            Question::Text(text) => (
                RenderKind::Text,
                text.placeholder.clone(),
                text.validation
                    .as_ref()
                    .is_some_and(|validation| validation.required),
                Vec::new(),
            ),
            Question::Choice(choice) => (
                if choice.allow_multiple {
                    RenderKind::MultiChoice
                } else {
                    RenderKind::SingleChoice
                },
                None,
                !choice.options.is_empty(),
                choice
                    .options
                    .iter()
                    .map(|option| RenderOption {
                        value: option.value.clone(),
                        label: option.label.clone(),
                    })
                    .collect(),
            ),
        };
        RenderQuestion {
            id: question.id(),
            kind,
            title: question.title().to_string(),
            helper_text: question.helper_text().map(str::to_string),
            placeholder,
            required,
            options,
            current_value: store.answers().get(&question.id()).cloned(),
        }
    });

    RenderPayload {
        form_id: store.questionnaire().id.clone(),
        status: store.status(),
        question,
        progress: store.progress(),
        final_message: store.final_message().map(str::to_string),
    }
}

pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Form: {} [{}] ({}/{}, {}%)",
        payload.form_id,
        payload.status.as_str(),
        payload.progress.position,
        payload.progress.total,
        payload.progress.percent
    ));

    if let Some(message) = &payload.final_message {
        lines.push(message.clone());
        return lines.join("\n");
    }

    match &payload.question {
        Some(question) => {
            lines.push(question.title.clone());
            if let Some(helper) = &question.helper_text {
                lines.push(format!("  {}", helper));
            }
            for (idx, option) in question.options.iter().enumerate() {
                lines.push(format!("  {}) {}", idx + 1, option.label));
            }
            if question.kind == RenderKind::MultiChoice {
                lines.push("  (several options allowed, separated by commas)".to_string());
            }
            if let Some(value) = &question.current_value {
                lines.push(format!("  Current value: {}", value.tokens().join(", ")));
            }
        }
        None => lines.push("No question to answer.".to_string()),
    }

    lines.join("\n")
}

pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let question = payload.question.as_ref().map(|question| {
        json!({
            "id": question.id,
            "kind": question.kind.as_str(),
            "title": question.title,
            "helper_text": question.helper_text,
            "placeholder": question.placeholder,
            "required": question.required,
            "options": question
                .options
                .iter()
                .map(|option| json!({ "value": option.value, "label": option.label }))
                .collect::<Vec<_>>(),
            "current_value": question.current_value,
        })
    });

    json!({
        "form_id": payload.form_id,
        "status": payload.status,
        "question": question,
        "progress": payload.progress,
        "final_message": payload.final_message,
    })
}
