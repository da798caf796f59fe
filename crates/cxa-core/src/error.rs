//! Unified error handling for cxa core.
//!
//! Wraps domain and application errors behind one type, with categories and
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, InitStage};

/// Root error type for cxa core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CxaError {
    /// Invalid names or identifiers.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration failures (missing packages, I/O, subprocesses).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A pipeline failure, tagged with the step that was running.
    #[error("{error}")]
    Init {
        stage: InitStage,
        error: Box<CxaError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CxaError {
    /// Tag this error with the init step it happened in. An already tagged
    /// error keeps its original stage.
    pub fn at_stage(self, stage: InitStage) -> Self {
        match self {
            Self::Init { .. } => self,
            other => Self::Init {
                stage,
                error: Box::new(other),
            },
        }
    }

    /// The init step this error happened in, if known.
    pub fn stage(&self) -> Option<InitStage> {
        match self {
            Self::Init { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage tag removed.
    pub fn root(&self) -> &CxaError {
        match self {
            Self::Init { error, .. } => error.root(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Init { error, .. } => error.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in cxa".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Init { error, .. } => error.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The application error, if this is one.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self.root() {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        match category {
            crate::domain::ErrorCategory::Validation => Self::Validation,
            crate::domain::ErrorCategory::NotFound => Self::NotFound,
        }
    }
}

/// Convenient result type alias.
pub type CxaResult<T> = Result<T, CxaError>;
