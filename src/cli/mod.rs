use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber;

pub mod commands;

/// Lightning Network channel performance reporter
#[derive(Parser)]
#[command(name = "ln-channel-report")]
#[command(about = "Lightning Network channel performance reporter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: fetch dumps, generate the CSV, display the
    /// worst performers, clean up
    Report(commands::report::ReportCommand),
    /// Fetch the channel and forwarding-history dumps only
    Fetch(commands::fetch::FetchCommand),
    /// Generate the CSV report from existing dumps
    Process(commands::process::ProcessCommand),
    /// Filter and display an existing CSV report
    Show(commands::show::ShowCommand),
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(command) => command.run(),
        Commands::Fetch(command) => command.run(),
        Commands::Process(command) => command.run(),
        Commands::Show(command) => command.run(),
    }
}
