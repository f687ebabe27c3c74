//! The bootcamp scripts as one binary: every subcommand is a linear sequence of awaited calls that
//! aborts on the first error.

use bootcamp_client::transactions::BootcampClient;
use clap::Parser;

use crate::cli::Args;

pub mod cli;
pub mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.global.client_config()?;
    let payer = args.global.payer()?;

    let client = BootcampClient::new(config.connect(), config);
    commands::run(&client, &payer, args.command).await
}
