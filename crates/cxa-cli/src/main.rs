//! # cxa
//!
//! Create an app from a template package, with addons.
//!
//! Arguments are parsed first so `--help`, `--version` and usage errors
//! never touch logging or configuration. Everything after that runs inside
//! [`run`], whose [`CliError`] becomes the message and exit code below.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::{Verbosity, init_logging},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version arrive here too; clap routes them to stdout with
        // exit code 0.
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    let verbosity = cli.global.verbosity();
    if let Err(e) = init_logging(verbosity, !cli.global.no_color) {
        eprintln!("cxa: running without logs: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, verbosity),
    }
}

/// Load configuration, then hand off to the subcommand.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_ref())
        .map_err(|e| CliError::config("Failed to load configuration", e))?;
    debug!(config = ?cli.global.config, "configuration loaded");

    let output = OutputManager::new(&cli.global, &config);
    match cli.command {
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, config, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, cli.global.config.as_ref(), config, output)
        }
    }
}

/// Log the error, print it to stderr and pick the exit code.
fn report(err: &CliError, verbosity: Verbosity) -> ExitCode {
    err.log();

    let verbose = verbosity.shows_causes();
    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        // Clap's internal consistency check.
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn help_and_version_exit_zero_usage_errors_two() {
        for flag in ["--help", "--version"] {
            let err = Cli::try_parse_from(["cxa", flag]).unwrap_err();
            assert_eq!(err.exit_code(), 0, "{flag}");
        }
        let err = Cli::try_parse_from(["cxa", "init"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
