use std::io::{stdout, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

mod cli;
use crate::cli::Cli;
use crate::cli::Config;

mod inspect;
mod text;

fn main() -> ExitCode {
    env_logger::init();

    // Parse the cli
    let cli = Cli::parse();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("riffscope: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("{:?}", config);

    match inspect::inspect(&cli.file, &config, BufWriter::new(stdout().lock())) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("riffscope: {}", e);
            ExitCode::FAILURE
        }
    }
}
