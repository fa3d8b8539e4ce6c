use crate::commands::{
    run_autofix, run_check, run_demo, run_draft, run_review, run_rules, AutofixArgs, CheckArgs,
    DraftArgs, ReviewArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use patent_disclosure::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Patent Disclosure Assistant",
    about = "Check, draft and serve technical disclosure documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the quality checks against a disclosure record
    Check(CheckArgs),
    /// Render a Markdown draft from a disclosure record
    Draft(DraftArgs),
    /// Review a Markdown draft for missing sections and leftover placeholders
    Review(ReviewArgs),
    /// Propose values for blank title, document id and date fields
    Autofix(AutofixArgs),
    /// List the quality rules by category
    Rules,
    /// Walk a built-in record from failing to passing
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Draft(args) => run_draft(args),
        Command::Review(args) => run_review(args),
        Command::Autofix(args) => run_autofix(args),
        Command::Rules => run_rules(),
        Command::Demo => run_demo(),
    }
}
