#![deny(unused_crate_dependencies)]
mod commands;
mod config;
mod errors;
mod setup;

use config::Command;
use errors::Result;
use setup::setup_logger;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    let (cli, config) = config::parse()?;

    match cli.command {
        Command::SendBlob(args) => commands::send_blob::run(&args, &config).await,
        Command::CellProofs(args) => commands::cell_proofs::run(&args, &config).await,
        Command::CompareBackends(args) => commands::compare_backends::run(&args, &config),
        Command::PointEval(args) => commands::point_eval::run(&args, &config).await,
    }
}
