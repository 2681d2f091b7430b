#![forbid(unsafe_code)]

//! mottle: multi-scale Turing patterns in the terminal or as PNG files.

mod cli;
mod config;
mod error;
mod export;
mod logging;
mod session;
mod viewer;

use std::process::ExitCode;

use crate::cli::{Command, Opts};
use crate::error::AppError;

fn main() -> ExitCode {
    let opts = match cli::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::HELP_TEXT);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("mottle {}", cli::VERSION);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("mottle: {}", AppError::from(e));
            return ExitCode::from(2);
        }
    };

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("mottle: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts) -> Result<(), AppError> {
    logging::init(logging::target(
        opts.log_file.as_deref(),
        opts.export.is_some(),
    ))?;
    let scales = config::resolve_scales(&opts.scales)?;
    tracing::info!(scales = scales.len(), seed = ?opts.seed, "starting");

    match &opts.export {
        Some(path) => export::run(opts, scales, path),
        None => viewer::run(opts, scales),
    }
}
