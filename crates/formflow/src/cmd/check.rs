use anyhow::Result;

use super::Context;

pub fn run(ctx: &Context) -> Result<()> {
    ctx.ensure_well_formed()?;
    println!(
        "questionnaire '{}' is well formed ({} questions)",
        ctx.questionnaire.id,
        ctx.questionnaire.questions.len()
    );
    Ok(())
}
