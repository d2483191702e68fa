use crate::demo::{print_steps, run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use impact_award::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Impact Award Intake",
    about = "Run and demonstrate the Social Impact Entrepreneur Award application form",
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
    /// Walk a sample application through every step and submit it
    Demo(DemoArgs),
    /// Print the step table with each section's required fields
    Steps,
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
        Command::Demo(args) => run_demo(args),
        Command::Steps => {
            print_steps();
            Ok(())
        }
    }
}
