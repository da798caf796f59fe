// ============================================================================
// domain/error.rs - validation errors for names and identifiers
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::DependencyKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through the pipeline by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid addon name '{name}': {reason}")]
    InvalidAddonName { name: String, reason: String },

    #[error("invalid template identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("unknown package manager '{0}'")]
    UnknownPackageManager(String),

    // ========================================================================
    // Manifest shape violations
    // ========================================================================
    #[error("script '{name}' is not a string")]
    ScriptNotString { name: String },

    /// `index` counts from zero within `list` alone.
    #[error("{list} entry #{index} has an empty name")]
    EmptyDependencyName { list: DependencyKind, index: usize },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '-' and '_'".into(),
                "Examples: my-app, my_app, app2".into(),
            ],
            Self::InvalidAddonName { name, .. } => vec![
                format!("'{name}' must be a single directory name under the template's addons/"),
                "Separate several addons with commas: --addon eslint,jest".into(),
            ],
            Self::InvalidIdentifier { .. } => vec![
                "Pass a registry template name: --template react".into(),
                "Or a local package: --template file:./path/to/template".into(),
            ],
            Self::UnknownPackageManager(_) => vec!["Supported package managers: npm, yarn".into()],
            Self::ScriptNotString { name } => vec![format!(
                "Write \"{name}\" as a shell command string, e.g. \"{name}\": \"node index.js\""
            )],
            Self::EmptyDependencyName { list, index } => vec![format!(
                "Give {list}[{index}] in template.json a non-empty \"name\""
            )],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ScriptNotString { .. } | Self::EmptyDependencyName { .. } => {
                ErrorCategory::NotFound
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
