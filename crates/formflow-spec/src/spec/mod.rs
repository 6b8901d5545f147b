pub mod catalog;
pub mod form;
pub mod question;

pub use catalog::credit_manager_questionnaire;
pub use form::{FinalMessages, GraphIssue, Questionnaire, QuestionnaireError};
pub use question::{
    AnswerOption, ChoiceQuestion, Question, QuestionId, TextQuestion, TextValidation,
    UnknownQuestionId,
};
