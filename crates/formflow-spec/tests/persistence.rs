use serde_json::{Value, json};

use formflow_spec::{
    AnswerValue, FileStore, KeyValueStore, MemoryStore, QuestionId, STORAGE_KEY, Session,
    SessionStore, Status, StorageError, credit_manager_questionnaire,
};

fn stored(store: &MemoryStore) -> Value {
    let raw = store
        .get(STORAGE_KEY)
        .expect("memory store read")
        .expect("session persisted");
    serde_json::from_str(&raw).expect("persisted json")
}

/// Storage that fails every call.
struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}

#[test]
fn every_mutation_is_persisted_under_the_fixed_key() {
    let questionnaire = credit_manager_questionnaire();
    let mut storage = MemoryStore::new();
    {
        let mut store = SessionStore::new(&questionnaire, &mut storage);
        store.submit_answer(QuestionId::Name, "Ana Silva");
    }
    assert_eq!(
        stored(&storage),
        json!({
            "currentQuestionId": "email",
            "answers": { "name": "Ana Silva" },
            "status": "inProgress",
            "disqualifyMessage": null
        })
    );

    {
        let mut store = SessionStore::new(&questionnaire, &mut storage);
        store.reset();
    }
    assert_eq!(
        stored(&storage),
        json!({
            "currentQuestionId": "name",
            "answers": {},
            "status": "inProgress",
            "disqualifyMessage": null
        })
    );
}

#[test]
fn session_survives_a_reload() {
    let questionnaire = credit_manager_questionnaire();
    let mut storage = MemoryStore::new();
    {
        let mut store = SessionStore::new(&questionnaire, &mut storage);
        store.submit_answer(QuestionId::Name, "Ana Silva");
        store.submit_answer(QuestionId::Email, "ana@x.pt");
    }

    let store = SessionStore::new(&questionnaire, &mut storage);
    assert_eq!(store.status(), Status::InProgress);
    assert_eq!(
        store.session().current_question_id,
        Some(QuestionId::Location)
    );
    assert_eq!(
        store.answers().get(&QuestionId::Email),
        Some(&AnswerValue::Single("ana@x.pt".into()))
    );
}

#[test]
fn terminal_statuses_round_trip() {
    let questionnaire = credit_manager_questionnaire();
    let mut storage = MemoryStore::new();
    {
        let mut store = SessionStore::new(&questionnaire, &mut storage);
        store.submit_answer(QuestionId::Name, "Ana Silva");
        store.submit_answer(QuestionId::Email, "ana@x.pt");
        store.submit_answer(QuestionId::Location, "Lisboa");
        store.submit_answer(QuestionId::Education, "12-ano");
        store.submit_answer(QuestionId::JobStatus, "comercial");
        store.submit_answer(QuestionId::PeopleSkills, "no-public-contact");
    }
    let store = SessionStore::new(&questionnaire, &mut storage);
    assert_eq!(store.status(), Status::Disqualified);
    assert_eq!(store.session().current_question_id, None);
    assert_eq!(
        store.disqualify_message(),
        questionnaire.disqualifying_answer(QuestionId::PeopleSkills, "no-public-contact")
    );
}

#[test]
fn corrupt_json_starts_fresh() {
    let questionnaire = credit_manager_questionnaire();
    let storage = MemoryStore::new().with_entry(STORAGE_KEY, "{not json");
    let store = SessionStore::new(&questionnaire, storage);
    assert_eq!(store.session(), &Session::initial(&questionnaire));
}

#[test]
fn non_object_payload_starts_fresh() {
    let questionnaire = credit_manager_questionnaire();
    let storage = MemoryStore::new().with_entry(STORAGE_KEY, "[1, 2, 3]");
    let store = SessionStore::new(&questionnaire, storage);
    assert_eq!(store.session(), &Session::initial(&questionnaire));
}

#[test]
fn unknown_status_falls_back_to_in_progress() {
    let questionnaire = credit_manager_questionnaire();
    let session = Session::from_value(
        &json!({
            "currentQuestionId": "motivation",
            "answers": {},
            "status": "paused",
            "disqualifyMessage": "stale"
        }),
        &questionnaire,
    );
    assert_eq!(session.status, Status::InProgress);
    assert_eq!(session.current_question_id, Some(QuestionId::Motivation));
    assert_eq!(session.disqualify_message, None);
}

#[test]
fn stale_question_ids_fall_back_per_status() {
    let questionnaire = credit_manager_questionnaire();

    let in_progress = Session::from_value(
        &json!({ "currentQuestionId": "salary", "status": "inProgress" }),
        &questionnaire,
    );
    assert_eq!(in_progress.current_question_id, Some(QuestionId::Name));

    let completed = Session::from_value(
        &json!({ "currentQuestionId": "salary", "status": "completed" }),
        &questionnaire,
    );
    assert_eq!(completed.current_question_id, Some(QuestionId::Success));

    let disqualified = Session::from_value(
        &json!({ "currentQuestionId": 7, "status": "disqualified", "disqualifyMessage": "bye" }),
        &questionnaire,
    );
    assert_eq!(disqualified.current_question_id, None);
    assert_eq!(disqualified.disqualify_message.as_deref(), Some("bye"));
}

#[test]
fn malformed_answers_are_dropped() {
    let questionnaire = credit_manager_questionnaire();
    let session = Session::from_value(
        &json!({
            "currentQuestionId": "education",
            "status": "inProgress",
            "answers": {
                "name": "Ana Silva",
                "email": 12,
                "location": ["Lisboa", null],
                "education": ["12-ano"],
                "salary": "1000"
            }
        }),
        &questionnaire,
    );
    assert_eq!(session.answers.len(), 2);
    assert_eq!(
        session.answers.get(&QuestionId::Name),
        Some(&AnswerValue::Single("Ana Silva".into()))
    );
    assert_eq!(
        session.answers.get(&QuestionId::Education),
        Some(&AnswerValue::Multiple(vec!["12-ano".into()]))
    );

    let array_answers = Session::from_value(
        &json!({ "status": "inProgress", "answers": ["Ana"] }),
        &questionnaire,
    );
    assert!(array_answers.answers.is_empty());
}

#[test]
fn unavailable_storage_does_not_block_transitions() {
    let questionnaire = credit_manager_questionnaire();
    let mut store = SessionStore::new(&questionnaire, UnavailableStore);
    assert_eq!(store.session(), &Session::initial(&questionnaire));

    store.submit_answer(QuestionId::Name, "Ana Silva");
    assert_eq!(store.session().current_question_id, Some(QuestionId::Email));
    store.reset();
    assert_eq!(store.session().current_question_id, Some(QuestionId::Name));
}

#[test]
fn file_store_persists_between_processes() {
    let questionnaire = credit_manager_questionnaire();
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut store = SessionStore::new(&questionnaire, FileStore::new(dir.path()));
        store.submit_answer(QuestionId::Name, "Ana Silva");
    }
    assert!(dir.path().join("form-flow-state.json").exists());

    let store = SessionStore::new(&questionnaire, FileStore::new(dir.path()));
    assert_eq!(store.session().current_question_id, Some(QuestionId::Email));
}
