use crate::assess::{run_assessment, run_questions, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use matchvita::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "matchvita",
    about = "Score health self-assessments and recommend vitamins and foods",
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
    /// Score a file of quiz answers and print the result
    Assess(AssessArgs),
    /// Print the standard quiz questions and answer options
    Questions,
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
        Command::Assess(args) => run_assessment(args),
        Command::Questions => run_questions(),
    }
}
