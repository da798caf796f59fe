//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur during the init pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Target project directory already exists.
    #[error("\"{name}\" directory already exists at {path}")]
    ProjectExists { name: String, path: PathBuf },

    /// Non-recursive directory creation found the path already taken.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// Template package could not be fetched or has no content root.
    #[error("Template \"{identifier}\" not found: {reason}")]
    TemplateNotFound { identifier: String, reason: String },

    /// One or more selected addons have no loadable manifest.
    #[error("Addon(s) not found: {}", names.join(", "))]
    AddonsNotFound { names: Vec<String> },

    /// Manifest file absent.
    #[error("Manifest missing: {path}")]
    ManifestMissing { path: PathBuf },

    /// Manifest present but not the declared shape.
    #[error("Manifest {path} is invalid: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// Manifest parsed but breaks a content rule.
    #[error("Manifest {path} is invalid: {error}")]
    ManifestRejected { path: PathBuf, error: DomainError },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// External command could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { name, path } => vec![
                format!("Directory already exists: {}", path.display()),
                format!("Choose a different project name than '{name}'"),
                "Or remove the existing directory first".into(),
            ],
            Self::AlreadyExists { path } => vec![
                format!("Something else created {} first", path.display()),
                "Remove or rename it and try again".into(),
            ],
            Self::TemplateNotFound { identifier, .. } => vec![
                format!("Check that the template '{identifier}' is published"),
                "Registry templates are looked up as cxa-template-<name>".into(),
                "Local templates use: --template file:./path/to/template".into(),
            ],
            Self::AddonsNotFound { names } => vec![
                format!("No addons/<name>/template.json for: {}", names.join(", ")),
                "Addon names must match a directory under the template's addons/".into(),
            ],
            Self::ManifestMissing { path } | Self::ManifestInvalid { path, .. } => vec![
                format!("Check {}", path.display()),
                "template.json must look like { \"package\": { \"scripts\": {}, \"dependencies\": [] } }"
                    .into(),
            ],
            Self::ManifestRejected { path, error } => {
                let mut suggestions = vec![format!("Check {}", path.display())];
                suggestions.extend(error.suggestions());
                suggestions
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Try running `{command}` yourself to see its output"),
                "Ensure the package manager is installed and in your PATH".into(),
            ],
            Self::RollbackFailed { path, .. } => {
                vec![format!("Remove {} manually", path.display())]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } | Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. }
            | Self::AddonsNotFound { .. }
            | Self::ManifestMissing { .. }
            | Self::ManifestInvalid { .. } => ErrorCategory::NotFound,
            Self::ManifestRejected { error, .. } => error.category().into(),
            Self::FilesystemError { .. }
            | Self::CommandFailed { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
