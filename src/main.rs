mod cli;
mod commands;
mod config;
mod error;
mod model;
mod output;
mod prompt;
mod providers;
mod selection;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    cli.execute().await?;

    Ok(())
}
