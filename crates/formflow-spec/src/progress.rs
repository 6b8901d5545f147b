use serde::Serialize;

use crate::spec::form::Questionnaire;
use crate::spec::question::{Question, QuestionId};

/// Position of the respondent within the declared question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
    pub percent: u8,
}

/// Computes progress over every question except the terminal success one.
/// Without a current question the respondent is treated as being on the first.
pub fn progress(questionnaire: &Questionnaire, current: Option<QuestionId>) -> Progress {
    let total = questionnaire
        .questions
        .iter()
        .map(Question::id)
        .filter(|id| !id.is_success())
        .count();
    if total == 0 {
        return Progress {
            position: 0,
            total,
            percent: 0,
        };
    }

    let index = current
        .and_then(|id| questionnaire.position(id))
        .unwrap_or(0);
    let position = (index + 1).min(total);
    let percent = ((position as f64 / total as f64) * 100.0).round() as u8;

    Progress {
        position,
        total,
        percent,
    }
}
