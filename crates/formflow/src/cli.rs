use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::cmd::{
    self, Context, export::ExportArgs, schema::SchemaArgs, session::AnswerArgs,
    session::StatusArgs,
};
use crate::config::{FileConfig, Overrides, Settings};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "formflow",
    about = "Walk a branching questionnaire from the terminal",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Config file (defaults to <config_dir>/formflow/config.toml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted session
    #[arg(long = "state-dir", value_name = "DIR", global = true)]
    state_dir: Option<PathBuf>,

    /// Question graph JSON to use instead of the built-in one
    #[arg(long = "questionnaire", value_name = "PATH", global = true)]
    questionnaire: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer questions interactively until the form ends
    Run,
    /// Show the current question or final message
    Status(StatusArgs),
    /// Submit one answer without prompting
    Answer(AnswerArgs),
    /// Discard the stored session and start over
    Reset,
    /// Print the answers of a completed session
    Export(ExportArgs),
    /// Validate the question graph
    Check,
    /// Print a JSON schema
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(
        Overrides {
            state_dir: cli.state_dir,
            questionnaire: cli.questionnaire,
        },
        file,
    );
    tracing::debug!(state_dir = %settings.state_dir.display(), "resolved settings");

    // Schema output needs no questionnaire, so the context is built per command.
    let ctx = || Context::from_settings(&settings);
    match cli.command {
        Commands::Run => cmd::run::run(&ctx()?),
        Commands::Status(args) => cmd::session::status(&ctx()?, &args),
        Commands::Answer(args) => cmd::session::answer(&ctx()?, &args),
        Commands::Reset => cmd::session::reset(&ctx()?),
        Commands::Export(args) => cmd::export::run(&ctx()?, &args),
        Commands::Check => cmd::check::run(&ctx()?),
        Commands::Schema(args) => cmd::schema::run(&args),
    }
}
