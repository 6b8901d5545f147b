use formflow_spec::{
    AnswerValue, Question, QuestionId, Questionnaire, Status, credit_manager_questionnaire,
    resolve,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "multi_select" => include_str!("../tests/fixtures/multi_select.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn question(questionnaire: &Questionnaire, id: QuestionId) -> &Question {
    questionnaire.question(id).expect("question in graph")
}

fn tokens(values: &[&str]) -> AnswerValue {
    AnswerValue::Multiple(values.iter().map(|value| value.to_string()).collect())
}

#[test]
fn single_select_follows_the_chosen_option() {
    let questionnaire = credit_manager_questionnaire();
    let motivation = question(&questionnaire, QuestionId::Motivation);

    let resolution = resolve(motivation, &"targets".into());
    assert_eq!(resolution.next_question_id, Some(QuestionId::Attitude));
    assert_eq!(resolution.status, Status::InProgress);

    let resolution = resolve(motivation, &"fixed-income".into());
    assert_eq!(resolution.status, Status::Disqualified);
    assert_eq!(resolution.next_question_id, None);
    assert!(
        resolution
            .disqualify_message
            .as_deref()
            .is_some_and(|message| message.starts_with("Esta função baseia-se em comissões"))
    );
}

#[test]
fn every_single_select_option_resolves_per_its_own_configuration() {
    let questionnaire = credit_manager_questionnaire();
    for question in &questionnaire.questions {
        let Question::Choice(choice) = question else {
            continue;
        };
        for option in &choice.options {
            let resolution = resolve(question, &option.value.as_str().into());
            match option.disqualifier() {
                Some(message) => {
                    assert_eq!(resolution.status, Status::Disqualified);
                    assert_eq!(resolution.disqualify_message.as_deref(), Some(message));
                    assert_eq!(resolution.next_question_id, None);
                }
                None => {
                    assert_eq!(resolution.next_question_id, option.next_question);
                    let expected = match option.next_question {
                        None | Some(QuestionId::Success) => Status::Completed,
                        Some(_) => Status::InProgress,
                    };
                    assert_eq!(resolution.status, expected);
                }
            }
        }
    }
}

#[test]
fn attitude_ambitious_reaches_success() {
    let questionnaire = credit_manager_questionnaire();
    let resolution = resolve(
        question(&questionnaire, QuestionId::Attitude),
        &"ambitious".into(),
    );
    assert_eq!(resolution.next_question_id, Some(QuestionId::Success));
    assert_eq!(resolution.status, Status::Completed);
}

#[test]
fn unmatched_selection_stays_on_the_question() {
    let questionnaire = credit_manager_questionnaire();
    let education = question(&questionnaire, QuestionId::Education);

    let resolution = resolve(education, &"doutoramento".into());
    assert_eq!(resolution.next_question_id, Some(QuestionId::Education));
    assert_eq!(resolution.status, Status::InProgress);

    let resolution = resolve(education, &tokens(&[]));
    assert_eq!(resolution.next_question_id, Some(QuestionId::Education));
}

#[test]
fn multi_select_first_declared_disqualifier_wins() {
    let questionnaire = Questionnaire::from_json(fixture("multi_select")).expect("fixture");
    let languages = question(&questionnaire, QuestionId::Education);

    let resolution = resolve(languages, &tokens(&["es", "en", "none"]));
    assert_eq!(resolution.status, Status::Disqualified);
    assert_eq!(
        resolution.disqualify_message.as_deref(),
        Some("At least one language is needed.")
    );
}

#[test]
fn multi_select_uses_first_declared_option_with_a_successor() {
    let questionnaire = Questionnaire::from_json(fixture("multi_select")).expect("fixture");
    let languages = question(&questionnaire, QuestionId::Education);

    let resolution = resolve(languages, &tokens(&["fr", "pt", "en"]));
    assert_eq!(resolution.next_question_id, Some(QuestionId::Location));
    assert_eq!(resolution.status, Status::InProgress);

    let resolution = resolve(languages, &tokens(&["fr"]));
    assert_eq!(resolution.next_question_id, Some(QuestionId::Success));
    assert_eq!(resolution.status, Status::Completed);
}

#[test]
fn multi_select_without_any_successor_completes() {
    let questionnaire = Questionnaire::from_json(fixture("multi_select")).expect("fixture");
    let resolution = resolve(
        question(&questionnaire, QuestionId::Education),
        &tokens(&["pt"]),
    );
    assert_eq!(resolution.next_question_id, None);
    assert_eq!(resolution.status, Status::Completed);
}

#[test]
fn empty_disqualification_message_does_not_disqualify() {
    let questionnaire: Questionnaire = serde_json::from_value(serde_json::json!({
        "id": "blank-messages",
        "questions": [
            {
                "type": "choice",
                "id": "education",
                "title": "Education?",
                "options": [
                    { "value": "a", "label": "A", "nextQuestion": null, "disqualifyMessage": "" },
                    { "value": "b", "label": "B", "nextQuestion": "attitude", "disqualifyMessage": "" }
                ]
            },
            { "type": "choice", "id": "attitude", "title": "Attitude?", "options": [] },
            { "type": "choice", "id": "success", "title": "Done", "options": [] }
        ],
        "finalMessages": { "success": "ok" }
    }))
    .expect("deserialize");
    let education = question(&questionnaire, QuestionId::Education);

    let resolution = resolve(education, &"a".into());
    assert_eq!(resolution.status, Status::Completed);
    assert_eq!(resolution.next_question_id, None);
    assert_eq!(resolution.disqualify_message, None);

    let resolution = resolve(education, &"b".into());
    assert_eq!(resolution.status, Status::InProgress);
    assert_eq!(resolution.next_question_id, Some(QuestionId::Attitude));
}
