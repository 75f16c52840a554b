mod baselines_cmd;
mod cli;
mod config;
mod convert;
mod input;
mod logging;
mod prepare_cmd;
mod score_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Baselines(args) => baselines_cmd::run(args),
        Command::Score(args) => score_cmd::run(args),
        Command::Prepare(args) => prepare_cmd::run(args),
    }
}
