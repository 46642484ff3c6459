// ABOUTME: Entry point for the ecs-rollout CLI application.
// ABOUTME: Parses arguments, sets up logging and maps failures to the exit code.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use ecs_rollout::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = commands::rollout(cli, &mut output).await {
        output.error(e.kind(), &e.to_string());
        std::process::exit(1);
    }
}
