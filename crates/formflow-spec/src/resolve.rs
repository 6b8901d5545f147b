//! Pure navigation over the question graph.

use crate::answers::AnswerValue;
use crate::session::Status;
use crate::spec::question::{AnswerOption, ChoiceQuestion, Question, QuestionId};

/// Outcome of resolving one submitted value against its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub next_question_id: Option<QuestionId>,
    pub disqualify_message: Option<String>,
    pub status: Status,
}

impl Resolution {
    fn towards(next_question_id: Option<QuestionId>) -> Self {
        let status = match next_question_id {
            None => Status::Completed,
            Some(id) if id.is_success() => Status::Completed,
            Some(_) => Status::InProgress,
        };
        Self {
            next_question_id,
            disqualify_message: None,
            status,
        }
    }

    fn stay(id: QuestionId) -> Self {
        Self {
            next_question_id: Some(id),
            disqualify_message: None,
            status: Status::InProgress,
        }
    }

    fn disqualified(message: Option<String>) -> Self {
        Self {
            next_question_id: None,
            disqualify_message: message,
            status: Status::Disqualified,
        }
    }
}

pub fn resolve(question: &Question, value: &AnswerValue) -> Resolution {
    match question {
        Question::Text(text) => Resolution::towards(text.next_question),
        Question::Choice(choice) => resolve_choice(choice, value),
    }
}

fn resolve_choice(question: &ChoiceQuestion, value: &AnswerValue) -> Resolution {
    let selected = value.tokens();
    let matched: Vec<&AnswerOption> = question
        .options
        .iter()
        .filter(|option| selected.contains(&option.value.as_str()))
        .collect();

    // Declaration order decides, not selection order.
    if let Some(message) = matched.iter().find_map(|option| option.disqualifier()) {
        return Resolution::disqualified(Some(message.to_string()));
    }

    let Some(first) = matched.first() else {
        return Resolution::stay(question.id);
    };

    let next = if question.allow_multiple {
        matched.iter().find_map(|option| option.next_question)
    } else {
        first.next_question
    };
    Resolution::towards(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::question::TextQuestion;

    fn text_to(next: Option<QuestionId>) -> Question {
        Question::Text(TextQuestion {
            id: QuestionId::Location,
            title: "Where?".into(),
            helper_text: None,
            placeholder: None,
            validation: None,
            next_question: next,
        })
    }

    #[test]
    fn text_question_follows_static_successor() {
        let resolution = resolve(&text_to(Some(QuestionId::Education)), &"Porto".into());
        assert_eq!(resolution.next_question_id, Some(QuestionId::Education));
        assert_eq!(resolution.status, Status::InProgress);
        assert_eq!(resolution.disqualify_message, None);
    }

    #[test]
    fn text_question_without_successor_completes() {
        assert_eq!(
            resolve(&text_to(None), &"Porto".into()).status,
            Status::Completed
        );
        assert_eq!(
            resolve(&text_to(Some(QuestionId::Success)), &"Porto".into()).status,
            Status::Completed
        );
    }
}
