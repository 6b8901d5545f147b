use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use formflow_spec::{questionnaire_schema, session_schema};

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Which document to describe
    #[arg(value_enum, default_value = "questionnaire")]
    pub kind: SchemaKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Questionnaire,
    Session,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    let schema = match args.kind {
        SchemaKind::Questionnaire => questionnaire_schema(),
        SchemaKind::Session => session_schema(),
    }
    .context("failed to generate schema")?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
