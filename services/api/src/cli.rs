use crate::demo::{run_demo, run_plan, DemoArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trainset_induction::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Trainset Induction Planner",
    about = "Plan nightly trainset induction from the command line or over HTTP",
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
    /// Plan a roster read from a JSON file
    Plan(PlanArgs),
    /// Plan a seeded synthetic fleet for stakeholder demos
    Demo(DemoArgs),
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
        Command::Plan(args) => run_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}
