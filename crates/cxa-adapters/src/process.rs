//! Subprocess adapter for the package manager.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use cxa_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandStatus},
    },
    error::{CxaError, CxaResult},
};

/// Runs commands with `std::process`, blocking until they exit.
///
/// Stdout and stderr are inherited so package-manager progress reaches the
/// user's terminal directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    quiet: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard child stdout (stderr is still shown).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(program = argv.first().map(String::as_str).unwrap_or_default()))]
    fn run(&self, argv: &[String], cwd: &Path) -> CxaResult<CommandStatus> {
        let (program, args) = argv.split_first().ok_or_else(|| CxaError::Internal {
            message: "empty command line".into(),
        })?;

        let stdout = if self.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        let status = Command::new(program_name(program))
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::CommandFailed {
                command: argv.join(" "),
                reason: format!("could not start {program}: {e}"),
            })?;

        let status = CommandStatus::from_code(status.code());
        debug!(%status, "command finished");
        Ok(status)
    }
}

/// npm and yarn ship as `.cmd` shims on Windows.
#[cfg(windows)]
fn program_name(program: &str) -> String {
    match program {
        "npm" | "yarn" => format!("{program}.cmd"),
        other => other.to_string(),
    }
}

#[cfg(not(windows))]
fn program_name(program: &str) -> String {
    program.to_string()
}
