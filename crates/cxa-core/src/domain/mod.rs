//! Core domain layer for cxa.
//!
//! Pure logic only: manifests and their merge rules, addon selection,
//! validated names and identifiers, package-manager argv conventions.
//!
//! ## Rules
//!
//! - **No I/O**: no filesystem, network, or subprocess calls
//! - **Self-validating values**: names and identifiers check themselves at
//!   construction
//! - **Deterministic merges**: same inputs in the same order give the same
//!   manifest
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    ADDONS_DIR, AddonSelection, CombinedManifest, DependencySpec, FILES_DIR, InitStage,
    MANIFEST_FILE, Manifest, ProjectManifest, Scripts, TemplateDescriptor,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    AddonName, DependencyKind, LOCAL_SCHEME, PackageManager, PackageRef, ProjectName,
};
