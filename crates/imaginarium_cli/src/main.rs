//! Imaginarium catalog command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration and start logging before touching the catalog.
//! - Dispatch one subcommand, or the interactive menu when none is given.
//!
//! # Invariants
//! - Store-level failures are reported and never abort the process.
//! - Startup and terminal I/O failures are fatal and exit with code 2.

mod app;
mod args;
mod commands;
mod menu;

use app::App;
use args::{Cli, Command};
use clap::Parser;
use imaginarium_core::{core_version, error_chain, init_logging, AppConfig};
use log::{error, info};
use std::error::Error;
use std::io;
use std::process::ExitCode;

const FATAL_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match startup(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(FATAL_EXIT_CODE);
        }
    };

    let app = App::new(&config);
    let command = cli.command.unwrap_or(Command::Menu);
    let status = commands::execute(&app, command, &mut io::stdout(), &mut io::stderr());

    match status {
        Ok(status) => {
            info!("event=cli_stop module=cli status=ok");
            status.into()
        }
        Err(err) => {
            error!(
                "event=cli_stop module=cli status=error error_code=terminal_io error={}",
                error_chain(&err)
            );
            eprintln!("Unexpected error. Please check logs.");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

fn startup(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let config = AppConfig::resolve(&cli.overrides())?;
    init_logging(config.log_level, &config.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        core_version(),
        config.data_file.display()
    );
    Ok(config)
}
