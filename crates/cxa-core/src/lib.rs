//! cxa core - hexagonal architecture implementation
//!
//! Domain and application layers for the `cxa` project scaffolder, following
//! the ports and adapters architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              cxa-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (InitService, Materializer, Finalizer) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, PackageFetcher, Commands)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      cxa-adapters (Infrastructure)      │
//! │  (LocalFilesystem, npm pack, processes) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Manifest, AddonSelection, PackageRef) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cxa_core::prelude::*;
//!
//! # fn run(fetcher: Box<dyn PackageFetcher>, fs: Box<dyn Filesystem>, runner: Box<dyn CommandRunner>) -> CxaResult<()> {
//! let service = InitService::new(fetcher, fs, runner);
//! let request = InitRequest::new("my-app", PackageRef::parse("react")?)
//!     .with_addons(AddonSelection::parse("eslint,jest")?);
//! let outcome = service.init(&request, &Environment::new(".", "/tmp/cxa"))?;
//! println!("created {}", outcome.project_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Environment, InitOptions, InitOutcome, InitRequest, InitService,
        ports::{CommandRunner, CommandStatus, Filesystem, PackageFetcher},
    };
    pub use crate::domain::{
        AddonSelection, CombinedManifest, DependencyKind, InitStage, Manifest, PackageManager,
        PackageRef, ProjectName, TemplateDescriptor,
    };
    pub use crate::error::{CxaError, CxaResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
