//! CLI entry point for the `nvme-bar0` binary.

use std::io;
use std::process::ExitCode;

use bar0_cli::{logging, run, Cli};
use bar0_core as _;
use clap::Parser;
use log as _;
use serde_json as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let failed = error.use_stderr();
            if let Err(print_error) = error.print() {
                eprintln!("error: {print_error}");
            }
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    match run(&cli, &mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
