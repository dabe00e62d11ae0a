use crate::demo::{run_demo, run_theme_list, DemoArgs, ThemeListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use imc_evaluation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "IMC Evaluation Platform",
    about = "Run and demonstrate the IMC organizational self-assessment service from the command line",
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
    /// Inspect the evaluation theme catalog
    Themes {
        #[command(subcommand)]
        command: ThemeCommand,
    },
    /// Run a scripted end-to-end evaluation in the terminal
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// List the available themes with their question counts and score ranges
    List(ThemeListArgs),
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
        Command::Themes {
            command: ThemeCommand::List(args),
        } => run_theme_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
