use anyhow::{Result, bail};
use clap::Args;
use formflow_spec::{
    Question, QuestionId, Transition, build_render_payload, render_json_ui, render_text,
};
use serde_json::{Value, json};

use super::Context;

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnswerArgs {
    /// Question to answer, e.g. `name` or `jobStatus`
    #[arg(value_name = "QUESTION")]
    pub question: QuestionId,
    /// Answer text, or one or more option values
    #[arg(value_name = "VALUE", required = true, num_args = 1..)]
    pub values: Vec<String>,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

pub fn status(ctx: &Context, args: &StatusArgs) -> Result<()> {
    let store = ctx.store();
    let payload = build_render_payload(&store);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?);
    } else {
        println!("{}", render_text(&payload));
    }
    Ok(())
}

pub fn answer(ctx: &Context, args: &AnswerArgs) -> Result<()> {
    ctx.ensure_well_formed()?;
    let mut store = ctx.store();
    let value = submission(store.questionnaire().question(args.question), &args.values);
    let transition = store.submit_answer(args.question, value);

    if args.json {
        let out = json!({
            "transition": transition,
            "status": store.status().as_str(),
            "current_question_id": store.session().current_question_id,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", describe(&transition));
        if let Some(message) = store.final_message() {
            println!("{message}");
        }
    }

    match transition {
        Transition::Ignored => bail!(
            "answer to '{}' ignored (session is {})",
            args.question,
            store.status().as_str()
        ),
        Transition::Rejected { error } => bail!("{}", error.message),
        _ => Ok(()),
    }
}

pub fn reset(ctx: &Context) -> Result<()> {
    let mut store = ctx.store();
    store.reset();
    println!(
        "session reset to '{}'",
        store
            .session()
            .current_question_id
            .map(|id| id.as_str())
            .unwrap_or("-")
    );
    Ok(())
}

/// Shapes command-line values into what the question expects: text answers
/// are joined with spaces, several choice values become a multi-select.
pub(crate) fn submission(question: Option<&Question>, values: &[String]) -> Value {
    match (question, values) {
        (Some(Question::Text(_)), _) => Value::String(values.join(" ")),
        (_, [single]) => Value::String(single.clone()),
        _ => Value::Array(values.iter().cloned().map(Value::String).collect()),
    }
}

pub(crate) fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Ignored => "ignored".to_string(),
        Transition::Rejected { error } => format!("rejected: {}", error.message),
        Transition::Stayed { question_id } => format!("no option selected, still on '{question_id}'"),
        Transition::Advanced { question_id } => format!("next question: '{question_id}'"),
        Transition::Completed => "completed".to_string(),
        Transition::Disqualified { .. } => "disqualified".to_string(),
    }
}
