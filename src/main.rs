mod check_cmd;
mod cli;
mod convert;
mod logging;
mod next_cmd;

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
        Command::Next(args) => next_cmd::run(args),
        Command::Check(args) => check_cmd::run(args),
    }
}
