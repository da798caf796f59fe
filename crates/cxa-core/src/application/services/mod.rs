//! Application services - orchestrate use cases.
//!
//! Each pipeline step lives in its own service; [`InitService`] strings them
//! together and owns the adapters.

use std::path::Path;

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::CommandRunner},
    domain::InitStage,
    error::CxaResult,
};

pub mod addon_aggregator;
pub mod finalizer;
pub mod init_service;
pub mod manifest_loader;
pub mod materializer;

pub use addon_aggregator::AddonAggregator;
pub use finalizer::{Finalized, PROJECT_MANIFEST_FILE, ProjectFinalizer};
pub use init_service::{InitOptions, InitOutcome, InitRequest, InitService};
pub use manifest_loader::ManifestLoader;
pub use materializer::{DOTFILE_PLACEHOLDERS, ProjectMaterializer};

/// Run a package-manager command and treat any non-zero status as fatal.
pub(crate) fn run_checked(runner: &dyn CommandRunner, argv: &[String], cwd: &Path) -> CxaResult<()> {
    let command = argv.join(" ");
    debug!(command = %command, cwd = %cwd.display(), "running");

    let status = runner.run(argv, cwd)?;
    if !status.success() {
        return Err(ApplicationError::CommandFailed {
            command,
            reason: status.to_string(),
        }
        .into());
    }
    Ok(())
}

pub(crate) fn advance(stage: &mut InitStage, next: InitStage) {
    debug!(from = %stage, to = %next, "stage");
    *stage = next;
}
