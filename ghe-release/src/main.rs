mod cli;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use ghe_release_lib::fetcher;
use ghe_release_lib::logging::initialize_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    initialize_logging(cli.global_args.verbose);
    let params = cli.into_params()?;

    let outcome = fetcher::run(&params).await;
    if !outcome.is_success() {
        ui::error(&outcome.message);
    } else if !outcome.message.is_empty() {
        ui::success(&outcome.message);
    }

    // The automation host reads exactly one JSON record from stdout.
    let record = serde_json::to_string(&outcome).context("Failed to serialize outcome")?;
    println!("{record}");

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
