//! WasteWatch CLI entry point

use std::process::ExitCode;

use clap::Parser;

use waste_watch::cli::{run_archive_command, run_meeting, run_prefs_command, Cli, Commands};
use waste_watch::infrastructure::init_logging;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Start(args) => run_meeting(args, cli.prefs_path, cli.archive_path).await,
        Commands::Archive { action } => run_archive_command(action, cli.archive_path).await,
        Commands::Prefs { action } => run_prefs_command(action, cli.prefs_path).await,
    }
}
