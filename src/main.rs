//! willitmerge binary entry point

mod cli;

use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Fatal errors only: individual trial failures are part of the
            // report, not a process failure.
            anstream::eprintln!("{} {e}", "error:".red());
            ExitCode::FAILURE
        }
    }
}
