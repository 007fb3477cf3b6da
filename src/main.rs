mod cli;
mod config;
mod convert;
mod logging;
mod measure_cmd;
mod synth_cmd;
mod traces;

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
        Command::Measure(args) => measure_cmd::run(args),
        Command::Synth(args) => synth_cmd::run(args),
    }
}
