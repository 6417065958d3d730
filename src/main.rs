//! whatsapi: WhatsApp gateway adapter
//!
//! Entry point for the whatsapi command-line tool.

use std::path::Path;
use std::process::ExitCode;

use whatsapi::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Commands that need no gateway configuration
    if !cli.command.needs_gateway() {
        return run_offline(&cli);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_command(config, cli.command)
}

/// Runs a command that needs no gateway configuration.
fn run_offline(cli: &Cli) -> ExitCode {
    match &cli.command {
        Command::Init { output } => handle_init(output),
        Command::Translate { file } => {
            setup_tracing(cli.verbose);
            handle_translate(file)
        }
        _ => exit_code::CONFIG_ERROR,
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `translate` subcommand.
fn handle_translate(file: &Path) -> ExitCode {
    match run::translate(file) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Translation failed: {e}");
            exit_code::runtime_error()
        }
    }
}

/// Runs a gateway command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_command(config: ValidatedConfig, command: Command) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config, command)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            exit_code::runtime_error()
        }
    }
}
