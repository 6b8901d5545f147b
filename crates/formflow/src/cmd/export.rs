use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use formflow_spec::AnswerExport;

use super::Context;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    CborHex,
}

pub fn run(ctx: &Context, args: &ExportArgs) -> Result<()> {
    let store = ctx.store();
    let export = store
        .export()
        .and_then(AnswerExport::stamped)
        .context("nothing to export")?;
    println!("{}", encode(&export, args.format)?);
    Ok(())
}

pub fn encode(export: &AnswerExport, format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Json => export.to_json_pretty()?,
        ExportFormat::CborHex => hex::encode(export.to_cbor()?),
    })
}
