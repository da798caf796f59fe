//! Application layer for cxa.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (InitService and its pipeline steps)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Environment**: The explicit process context every step runs against
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! merge rules itself. Those live in `crate::domain`.

pub mod environment;
pub mod error;
pub mod ports;
pub mod services;

pub use environment::Environment;

pub use services::{
    AddonAggregator, InitOptions, InitOutcome, InitRequest, InitService, ManifestLoader,
    ProjectFinalizer, ProjectMaterializer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, CommandStatus, Filesystem, PackageFetcher};

pub use error::ApplicationError;
