use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use formflow_spec::{ChoiceQuestion, Progress, Question, Transition, build_render_payload, render_text};
use serde_json::Value;
use tracing::debug;

use super::Context;

const BAR_WIDTH: usize = 20;

pub fn run(ctx: &Context) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(ctx, stdin.lock(), stdout.lock())
}

/// Drives the session until it reaches a terminal status, reading one answer
/// per line from `input`.
pub fn run_with<R: BufRead, W: Write>(ctx: &Context, mut input: R, mut output: W) -> Result<()> {
    ctx.ensure_well_formed()?;
    let mut store = ctx.store();

    loop {
        let payload = build_render_payload(&store);
        writeln!(output, "{}", render_text(&payload))?;
        if store.status().is_terminal() {
            return Ok(());
        }
        let Some(question) = store.current_question() else {
            bail!("session has no current question");
        };
        if ctx.show_progress {
            writeln!(output, "{}", progress_bar(&payload.progress))?;
        }

        let value = loop {
            write!(output, "> ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                bail!("stdin closed");
            }
            match parse_line(question, line.trim()) {
                Ok(value) => break value,
                Err(message) => writeln!(output, "  {message}")?,
            }
        };

        let transition = store.submit_answer(question.id(), value);
        debug!(question = %question.id(), ?transition, "interactive answer");
        match transition {
            Transition::Rejected { error } => writeln!(output, "  {}", error.message)?,
            Transition::Ignored => bail!("answer to '{}' was ignored", question.id()),
            _ => {}
        }
        writeln!(output)?;
    }
}

/// Turns a typed line into a submission for the question.
fn parse_line(question: &Question, line: &str) -> Result<Value, String> {
    match question {
        Question::Text(_) => Ok(Value::String(line.to_string())),
        Question::Choice(choice) => parse_choice(choice, line),
    }
}

/// Accepts option numbers or option values, comma separated for multi-select.
fn parse_choice(choice: &ChoiceQuestion, line: &str) -> Result<Value, String> {
    let tokens: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err("Select at least one option.".to_string());
    }
    if !choice.allow_multiple && tokens.len() > 1 {
        return Err("Select a single option.".to_string());
    }

    let mut values = Vec::with_capacity(tokens.len());
    for token in tokens {
        let option = match token.parse::<usize>() {
            Ok(number) => number
                .checked_sub(1)
                .and_then(|idx| choice.options.get(idx)),
            Err(_) => choice.option(token),
        };
        match option {
            Some(option) => values.push(Value::String(option.value.clone())),
            None => return Err(format!("Unknown option '{token}'.")),
        }
    }

    if choice.allow_multiple {
        Ok(Value::Array(values))
    } else {
        Ok(values.remove(0))
    }
}

fn progress_bar(progress: &Progress) -> String {
    let filled = BAR_WIDTH * usize::from(progress.percent.min(100)) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.percent
    )
}
