//! Error handling for the cxa CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use cxa_core::{domain::InitStage, error::CxaError};

pub use cxa_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag that is optional to clap but required for this run.
    #[error("{option} option is missing.")]
    MissingOption { option: &'static str },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// `config get` with a key that does not exist.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    /// `config init` would overwrite an existing file.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `cxa-core` or the adapters.
    #[error("{0}")]
    Core(#[from] CxaError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Configuration failure wrapping an `anyhow` chain.
    pub fn config(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The `init` step that failed, when the error came out of the pipeline.
    pub fn stage(&self) -> Option<InitStage> {
        match self {
            Self::Core(core) => core.stage(),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingOption { option } => vec![
                format!("Pass {option} <name>, e.g. {option} react"),
                "Or set defaults.template in the config file".into(),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Check the file printed by 'cxa config path'".into(),
                "Use 'cxa config init --force' to reset it to defaults".into(),
            ],

            Self::UnknownConfigKey { .. } => vec![
                "List the available keys with 'cxa config list'".into(),
            ],

            Self::ConfigExists { path } => vec![
                format!("Edit {} directly", path.display()),
                "Or pass --force to overwrite it".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingOption { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownConfigKey { .. } => ErrorCategory::UserError,
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));
        if let Some(stage) = self.stage() {
            output.push_str(&format!("  {} {}\n", "step:".dimmed(), stage));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));
        if let Some(stage) = self.stage() {
            out.push_str(&format!("  step: {stage}\n"));
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        if let Some(stage) = self.stage() {
            tracing::debug!(stage = %stage, "init aborted");
        }
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxa_core::application::ApplicationError;
    use cxa_core::domain::DomainError;
    use std::io;

    fn core(err: impl Into<CxaError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── messages ──────────────────────────────────────────────────────────

    #[test]
    fn missing_template_message_names_the_flag() {
        let err = CliError::MissingOption {
            option: "--template",
        };
        assert_eq!(err.to_string(), "--template option is missing.");
    }

    #[test]
    fn core_messages_pass_through() {
        let err = core(ApplicationError::TemplateNotFound {
            identifier: "nope".into(),
            reason: "404".into(),
        });
        assert!(err.to_string().starts_with("Template \"nope\" not found"));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::MissingOption {
                option: "--template"
            }
            .exit_code(),
            2
        );
        assert_eq!(
            core(ApplicationError::ProjectExists {
                name: "app".into(),
                path: PathBuf::from("/w/app"),
            })
            .exit_code(),
            2
        );
        assert_eq!(
            core(DomainError::InvalidProjectName {
                name: ".x".into(),
                reason: "hidden".into(),
            })
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            core(ApplicationError::AddonsNotFound {
                names: vec!["x".into()]
            })
            .exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            core(ApplicationError::CommandFailed {
                command: "npm install".into(),
                reason: "exit status 1".into(),
            })
            .exit_code(),
            1
        );
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::MissingOption {
            option: "--template",
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error: --template option is missing."));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_names_the_failed_step() {
        let err = core(
            CxaError::from(ApplicationError::CommandFailed {
                command: "npm init -y".into(),
                reason: "exit status 1".into(),
            })
            .at_stage(InitStage::FilesCopied),
        );
        assert_eq!(err.stage(), Some(InitStage::FilesCopied));
        assert_eq!(err.exit_code(), 1);

        let s = err.format_plain(false);
        assert!(s.contains("Error: Command `npm init -y` failed: exit status 1"));
        assert!(s.contains("  step: files-copied\n"));
        assert!(s.contains("npm init -y` yourself"));
    }

    #[test]
    fn errors_outside_init_have_no_step() {
        let err = CliError::MissingOption {
            option: "--template",
        };
        assert_eq!(err.stage(), None);
        assert!(!err.format_plain(false).contains("step:"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::config("bad file", anyhow::anyhow!("expected a table"));
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: expected a table"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "writing completions");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
